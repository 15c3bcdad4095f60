//! RGB to grayscale conversion using ITU-R BT.601 luminance formula.

use image::{GrayImage, Luma};

use crate::buffer::ImageBuffer;

/// Luminance of one RGB sample: Y = 0.299*R + 0.587*G + 0.114*B.
///
/// Integer math with coefficients scaled by 1000 (299 + 587 + 114 = 1000).
pub fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((299 * r + 587 * g + 114 * b) / 1000) as u8
}

/// Single-channel luminance plane of a buffer.
pub(crate) fn gray_plane(img: &ImageBuffer) -> GrayImage {
    match img {
        ImageBuffer::Gray(gray) => gray.clone(),
        ImageBuffer::Color(rgb) => {
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| Luma([luma(rgb.get_pixel(x, y).0)]))
        }
    }
}

/// Convert a buffer to single-channel grayscale.
///
/// Gray input is returned unchanged, so the conversion is idempotent.
pub fn to_grayscale(img: &ImageBuffer) -> ImageBuffer {
    ImageBuffer::Gray(gray_plane(img))
}
