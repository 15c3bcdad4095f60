//! Rendering functions for the stage layout.
//!
//! Pure rendering logic on ratatui frames, separate from terminal lifecycle
//! management in `tui`.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use super::panel::StagePanel;
use super::StatusBar;
use crate::recipe::Stage;

/// Render a status bar on the last row of `area`.
pub fn render_status_bar(frame: &mut ratatui::Frame, status_bar: &StatusBar, frames: u64, area: Rect) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1.min(area.height),
    };
    let status_paragraph = Paragraph::new(status_bar.format(frames))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status_paragraph, status_area);
}

/// Render every stage side by side, with the status bar underneath.
pub fn render_stages(
    frame: &mut ratatui::Frame,
    stages: &[Stage],
    status_bar: Option<&StatusBar>,
    frames: u64,
) {
    let area = frame.area();
    let show_status = status_bar.is_some_and(|sb| sb.visible);
    let main_area = if show_status {
        Rect {
            height: area.height.saturating_sub(1),
            ..area
        }
    } else {
        area
    };

    if !stages.is_empty() {
        let count = stages.len() as u32;
        let columns = Layout::horizontal(stages.iter().map(|_| Constraint::Ratio(1, count)))
            .split(main_area);
        for (stage, column) in stages.iter().zip(columns.iter()) {
            frame.render_widget(StagePanel::new(stage), *column);
        }
    }

    if let Some(sb) = status_bar {
        if sb.visible {
            render_status_bar(frame, sb, frames, area);
        }
    }
}
