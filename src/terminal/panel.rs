//! Bordered panel widget showing one stage as half-block pixels.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Widget};

use super::frame::{CellColor, HalfBlockFrame, UPPER_HALF_BLOCK};
use crate::recipe::Stage;

/// A titled panel with the stage image centred inside.
pub struct StagePanel<'a> {
    stage: &'a Stage,
}

impl<'a> StagePanel<'a> {
    pub fn new(stage: &'a Stage) -> Self {
        Self { stage }
    }
}

fn to_color(c: CellColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

impl Widget for StagePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = self.stage.image.dimensions();
        let block = Block::bordered()
            .title(format!(" {} ({}x{}) ", self.stage.label, w, h))
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let frame = HalfBlockFrame::from_image(&self.stage.image.to_rgb(), inner.width, inner.height);
        if frame.is_empty() {
            return;
        }

        let x0 = inner.x + (inner.width - frame.width) / 2;
        let y0 = inner.y + (inner.height - frame.height) / 2;
        for row in 0..frame.height {
            for col in 0..frame.width {
                let (Some(half), Some(cell)) =
                    (frame.get(col, row), buf.cell_mut((x0 + col, y0 + row)))
                else {
                    continue;
                };
                cell.set_char(UPPER_HALF_BLOCK)
                    .set_fg(to_color(half.top))
                    .set_bg(half.bottom.map_or(Color::Reset, to_color));
            }
        }
    }
}
