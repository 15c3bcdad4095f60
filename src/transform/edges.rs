//! Canny edge detection.

use imageproc::edges::canny;

use super::grayscale::gray_plane;
use crate::buffer::ImageBuffer;
use crate::error::ConfigurationError;

/// Detect edges with the Canny operator.
///
/// Colour input is converted to grayscale first. The result is a
/// single-channel buffer whose samples are either 0 or 255.
///
/// # Errors
/// `InvalidThresholds` if either threshold is negative or not finite, or if
/// `low > high`.
pub fn detect_edges(img: &ImageBuffer, low: f32, high: f32) -> Result<ImageBuffer, ConfigurationError> {
    check_thresholds(low, high)?;

    let gray = gray_plane(img);
    Ok(ImageBuffer::Gray(canny(&gray, low, high)))
}

pub(crate) fn check_thresholds(low: f32, high: f32) -> Result<(), ConfigurationError> {
    if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
        return Err(ConfigurationError::InvalidThresholds { low, high });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn split_image() -> GrayImage {
        GrayImage::from_fn(32, 32, |x, _| if x < 16 { Luma([0]) } else { Luma([255]) })
    }

    #[test]
    fn test_detect_edges_finds_vertical_boundary() {
        let edges = detect_edges(&ImageBuffer::Gray(split_image()), 100.0, 100.0).unwrap();
        let ImageBuffer::Gray(out) = edges else {
            panic!("edges must be single-channel");
        };
        let row: Vec<u8> = (0..32).map(|x| out.get_pixel(x, 16)[0]).collect();
        assert!(row.iter().any(|&v| v == 255), "boundary should be marked");
        assert_eq!(out.get_pixel(2, 16)[0], 0);
        assert_eq!(out.get_pixel(29, 16)[0], 0);
    }

    #[test]
    fn test_detect_edges_binary_output() {
        let edges = detect_edges(&ImageBuffer::Gray(split_image()), 50.0, 150.0).unwrap();
        assert!(edges.as_raw().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_detect_edges_accepts_color() {
        let rgb = RgbImage::from_fn(16, 16, |x, _| if x < 8 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) });
        let edges = detect_edges(&ImageBuffer::Color(rgb), 100.0, 100.0).unwrap();
        assert_eq!(edges.channels(), 1);
        assert_eq!(edges.dimensions(), (16, 16));
    }

    #[test]
    fn test_detect_edges_rejects_bad_thresholds() {
        let img = ImageBuffer::blank(8, 8);
        assert!(matches!(
            detect_edges(&img, 200.0, 100.0),
            Err(ConfigurationError::InvalidThresholds { .. })
        ));
        assert!(detect_edges(&img, -1.0, 100.0).is_err());
        assert!(detect_edges(&img, 0.0, f32::NAN).is_err());
    }

    #[test]
    fn test_detect_edges_flat_image_has_no_edges() {
        let img = ImageBuffer::Gray(GrayImage::from_pixel(16, 16, Luma([128])));
        let edges = detect_edges(&img, 100.0, 100.0).unwrap();
        assert!(edges.as_raw().iter().all(|&v| v == 0));
    }
}
