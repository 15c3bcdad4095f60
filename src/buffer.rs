//! Image buffers passed between acquisition, transformation and display.

use image::{DynamicImage, GrayImage, RgbImage};

/// An 8-bit image with one (grayscale) or three (RGB) channels.
///
/// Every frame the loop acquires is wrapped in this type, and every
/// transformation takes one by reference and returns a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageBuffer {
    /// Single-channel luminance
    Gray(GrayImage),
    /// Three-channel RGB
    Color(RgbImage),
}

impl ImageBuffer {
    /// Allocate a black RGB buffer.
    pub fn blank(width: u32, height: u32) -> Self {
        ImageBuffer::Color(RgbImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        match self {
            ImageBuffer::Gray(img) => img.width(),
            ImageBuffer::Color(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ImageBuffer::Gray(img) => img.height(),
            ImageBuffer::Color(img) => img.height(),
        }
    }

    /// (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Number of samples per pixel (1 or 3).
    pub fn channels(&self) -> u8 {
        match self {
            ImageBuffer::Gray(_) => 1,
            ImageBuffer::Color(_) => 3,
        }
    }

    pub fn is_gray(&self) -> bool {
        matches!(self, ImageBuffer::Gray(_))
    }

    /// Raw samples in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        match self {
            ImageBuffer::Gray(img) => img.as_raw(),
            ImageBuffer::Color(img) => img.as_raw(),
        }
    }

    /// Expand to RGB for display. Gray samples are replicated across channels.
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            ImageBuffer::Gray(img) => DynamicImage::ImageLuma8(img.clone()).to_rgb8(),
            ImageBuffer::Color(img) => img.clone(),
        }
    }

    /// Wrap a decoded image, keeping single-channel sources single-channel.
    ///
    /// Alpha is dropped and 16-bit samples are narrowed to 8 bits.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageLuma8(gray) => ImageBuffer::Gray(gray),
            DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_) => ImageBuffer::Gray(img.to_luma8()),
            DynamicImage::ImageRgb8(rgb) => ImageBuffer::Color(rgb),
            other => ImageBuffer::Color(other.to_rgb8()),
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            ImageBuffer::Gray(img) => DynamicImage::ImageLuma8(img),
            ImageBuffer::Color(img) => DynamicImage::ImageRgb8(img),
        }
    }
}

impl From<GrayImage> for ImageBuffer {
    fn from(img: GrayImage) -> Self {
        ImageBuffer::Gray(img)
    }
}

impl From<RgbImage> for ImageBuffer {
    fn from(img: RgbImage) -> Self {
        ImageBuffer::Color(img)
    }
}
