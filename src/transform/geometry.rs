//! Geometric transformations: exact resize and bounds-checked crop.

use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::buffer::ImageBuffer;
use crate::error::ConfigurationError;

/// Half-open crop rectangle: columns `x0..x1`, rows `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

impl CropRect {
    pub fn new(x0: u32, x1: u32, y0: u32, y1: u32) -> Self {
        Self { x0, x1, y0, y1 }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Whether the rectangle is non-empty and lies inside a `width` x `height` image.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.x0 < self.x1 && self.y0 < self.y1 && self.x1 <= width && self.y1 <= height
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}:{}", self.x0, self.x1, self.y0, self.y1)
    }
}

/// Parse `X0:X1,Y0:Y1`, e.g. `0:200,100:300`.
impl FromStr for CropRect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let usage = || format!("Invalid crop '{}'. Use X0:X1,Y0:Y1 (e.g., 0:200,100:300)", s);

        let (xs, ys) = s.split_once(',').ok_or_else(usage)?;
        let range = |part: &str| -> Result<(u32, u32), String> {
            let (a, b) = part.trim().split_once(':').ok_or_else(usage)?;
            let a = a.trim().parse().map_err(|_| usage())?;
            let b = b.trim().parse().map_err(|_| usage())?;
            Ok((a, b))
        };
        let (x0, x1) = range(xs)?;
        let (y0, y1) = range(ys)?;
        Ok(Self { x0, x1, y0, y1 })
    }
}

/// Resize to exactly `width` x `height`, ignoring aspect ratio.
///
/// Uses bilinear (triangle) filtering.
pub fn resize(img: &ImageBuffer, width: u32, height: u32) -> Result<ImageBuffer, ConfigurationError> {
    if width == 0 || height == 0 {
        return Err(ConfigurationError::EmptyResize { width, height });
    }

    Ok(match img {
        ImageBuffer::Gray(gray) => ImageBuffer::Gray(imageops::resize(gray, width, height, FilterType::Triangle)),
        ImageBuffer::Color(rgb) => ImageBuffer::Color(imageops::resize(rgb, width, height, FilterType::Triangle)),
    })
}

/// Cut out `rect`, yielding a `(x1 - x0)` x `(y1 - y0)` buffer.
///
/// # Errors
/// `CropOutOfBounds` if the rectangle is empty or extends past the image.
pub fn crop(img: &ImageBuffer, rect: CropRect) -> Result<ImageBuffer, ConfigurationError> {
    let (width, height) = img.dimensions();
    if !rect.fits(width, height) {
        return Err(ConfigurationError::CropOutOfBounds { rect, width, height });
    }

    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    Ok(match img {
        ImageBuffer::Gray(gray) => ImageBuffer::Gray(imageops::crop_imm(gray, x, y, w, h).to_image()),
        ImageBuffer::Color(rgb) => ImageBuffer::Color(imageops::crop_imm(rgb, x, y, w, h).to_image()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_crop_rect_parse() {
        let rect: CropRect = "0:200,100:300".parse().unwrap();
        assert_eq!(rect, CropRect::new(0, 200, 100, 300));
        assert_eq!(rect.width(), 200);
        assert_eq!(rect.height(), 200);
    }

    #[test]
    fn test_crop_rect_parse_rejects_garbage() {
        assert!("0:200".parse::<CropRect>().is_err());
        assert!("a:b,c:d".parse::<CropRect>().is_err());
        assert!("0-200,0-100".parse::<CropRect>().is_err());
    }

    #[test]
    fn test_crop_rect_display_round_trips() {
        let rect = CropRect::new(1, 2, 3, 4);
        assert_eq!(rect.to_string().parse::<CropRect>().unwrap(), rect);
    }

    #[test]
    fn test_resize_exact_dimensions() {
        let img = ImageBuffer::blank(600, 800);
        let out = resize(&img, 300, 200).unwrap();
        assert_eq!(out.dimensions(), (300, 200));
        assert_eq!(out.channels(), 3);
    }

    #[test]
    fn test_resize_upscale() {
        let img = ImageBuffer::Color(RgbImage::from_pixel(2, 2, Rgb([9, 9, 9])));
        let out = resize(&img, 10, 7).unwrap();
        assert_eq!(out.dimensions(), (10, 7));
    }

    #[test]
    fn test_resize_zero_is_configuration_error() {
        let img = ImageBuffer::blank(4, 4);
        assert_eq!(
            resize(&img, 0, 5),
            Err(ConfigurationError::EmptyResize { width: 0, height: 5 })
        );
    }

    #[test]
    fn test_crop_takes_the_right_pixels() {
        let rgb = RgbImage::from_fn(10, 10, |x, y| Rgb([x as u8, y as u8, 0]));
        let out = crop(&ImageBuffer::Color(rgb), CropRect::new(2, 5, 3, 9)).unwrap();
        assert_eq!(out.dimensions(), (3, 6));
        let ImageBuffer::Color(out) = out else {
            panic!("crop changed the channel count");
        };
        assert_eq!(out.get_pixel(0, 0), &Rgb([2, 3, 0]));
        assert_eq!(out.get_pixel(2, 5), &Rgb([4, 8, 0]));
    }

    #[test]
    fn test_crop_full_image() {
        let img = ImageBuffer::blank(8, 6);
        assert_eq!(crop(&img, CropRect::new(0, 8, 0, 6)).unwrap(), img);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let img = ImageBuffer::blank(8, 6);
        let rect = CropRect::new(4, 9, 0, 6);
        assert_eq!(
            crop(&img, rect),
            Err(ConfigurationError::CropOutOfBounds { rect, width: 8, height: 6 })
        );
    }

    #[test]
    fn test_crop_empty_rect() {
        let img = ImageBuffer::blank(8, 6);
        assert!(crop(&img, CropRect::new(3, 3, 0, 2)).is_err());
        assert!(crop(&img, CropRect::new(5, 2, 0, 2)).is_err());
    }
}
