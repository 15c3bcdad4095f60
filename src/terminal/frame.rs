//! Half-block pixel grids for terminal display.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// The glyph whose upper half is foreground.
pub const UPPER_HALF_BLOCK: char = '▀';

/// RGB color for a character cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<[u8; 3]> for CellColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// One terminal cell: the upper pixel, and the lower one if the image has it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HalfBlock {
    pub top: CellColor,
    pub bottom: Option<CellColor>,
}

/// Largest pixel size with the image's aspect ratio that fits in
/// `cols` x `rows` cells, two pixels per cell vertically.
///
/// Returns `(0, 0)` when either side is empty.
pub fn fit_within(img_w: u32, img_h: u32, cols: u16, rows: u16) -> (u32, u32) {
    if img_w == 0 || img_h == 0 || cols == 0 || rows == 0 {
        return (0, 0);
    }
    let avail_w = u64::from(cols);
    let avail_h = u64::from(rows) * 2;
    let (img_w, img_h) = (u64::from(img_w), u64::from(img_h));

    let (w, h) = if img_h * avail_w <= img_w * avail_h {
        (avail_w, img_h * avail_w / img_w)
    } else {
        (img_w * avail_h / img_h, avail_h)
    };
    (w.max(1) as u32, h.max(1) as u32)
}

/// An image scaled down to fit a cell area and folded into half blocks.
#[derive(Debug, Clone, Default)]
pub struct HalfBlockFrame {
    /// Cells in row-major order
    pub cells: Vec<HalfBlock>,
    /// Width in cells
    pub width: u16,
    /// Height in cells
    pub height: u16,
}

impl HalfBlockFrame {
    /// Scale `img` to fit `cols` x `rows` cells, keeping its aspect ratio.
    pub fn from_image(img: &RgbImage, cols: u16, rows: u16) -> Self {
        let (pw, ph) = fit_within(img.width(), img.height(), cols, rows);
        if pw == 0 || ph == 0 {
            return Self::default();
        }

        let scaled = if (pw, ph) == img.dimensions() {
            img.clone()
        } else {
            imageops::resize(img, pw, ph, FilterType::Triangle)
        };

        let width = pw as u16;
        let height = ph.div_ceil(2) as u16;
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in 0..u32::from(height) {
            for x in 0..pw {
                let top_y = row * 2;
                let top = CellColor::from(scaled.get_pixel(x, top_y).0);
                let bottom = (top_y + 1 < ph).then(|| CellColor::from(scaled.get_pixel(x, top_y + 1).0));
                cells.push(HalfBlock { top, bottom });
            }
        }

        Self {
            cells,
            width,
            height,
        }
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&HalfBlock> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells
            .get(row as usize * self.width as usize + col as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
