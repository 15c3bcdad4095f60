//! Neighbourhood filters: Gaussian blur and morphological dilation.

use image::{GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology;

use crate::buffer::ImageBuffer;
use crate::error::ConfigurationError;

/// Sigma used for a Gaussian kernel of width `kernel` when none is given.
///
/// sigma = 0.3 * ((k - 1) * 0.5 - 1) + 0.8
pub fn sigma_for_kernel(kernel: u32) -> f32 {
    0.3 * ((kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

pub(crate) fn check_kernel(kernel: u32) -> Result<(), ConfigurationError> {
    if kernel == 0 || kernel % 2 == 0 {
        return Err(ConfigurationError::InvalidKernel(kernel));
    }
    Ok(())
}

/// Radius of the square element for an odd dilation `kernel`.
pub(crate) fn dilate_radius(kernel: u32) -> Result<u8, ConfigurationError> {
    check_kernel(kernel)?;
    // LInf ball of radius r is a (2r + 1) square
    u8::try_from(kernel / 2).map_err(|_| ConfigurationError::InvalidKernel(kernel))
}

/// Gaussian blur with an odd `kernel`-wide window.
///
/// A kernel of 1 leaves the image unchanged.
pub fn blur(img: &ImageBuffer, kernel: u32) -> Result<ImageBuffer, ConfigurationError> {
    check_kernel(kernel)?;
    if kernel == 1 {
        return Ok(img.clone());
    }

    let sigma = sigma_for_kernel(kernel);
    Ok(match img {
        ImageBuffer::Gray(gray) => ImageBuffer::Gray(gaussian_blur_f32(gray, sigma)),
        ImageBuffer::Color(rgb) => ImageBuffer::Color(gaussian_blur_f32(rgb, sigma)),
    })
}

/// Dilate with a `kernel` x `kernel` square structuring element.
///
/// Colour images are dilated channel by channel.
pub fn dilate(img: &ImageBuffer, kernel: u32) -> Result<ImageBuffer, ConfigurationError> {
    let radius = dilate_radius(kernel)?;

    Ok(match img {
        ImageBuffer::Gray(gray) => ImageBuffer::Gray(morphology::dilate(gray, Norm::LInf, radius)),
        ImageBuffer::Color(rgb) => ImageBuffer::Color(dilate_channels(rgb, radius)),
    })
}

fn dilate_channels(rgb: &RgbImage, radius: u8) -> RgbImage {
    let (width, height) = rgb.dimensions();
    let planes: Vec<GrayImage> = (0..3)
        .map(|c| {
            let plane = GrayImage::from_fn(width, height, |x, y| image::Luma([rgb.get_pixel(x, y)[c]]));
            morphology::dilate(&plane, Norm::LInf, radius)
        })
        .collect();

    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            planes[0].get_pixel(x, y)[0],
            planes[1].get_pixel(x, y)[0],
            planes[2].get_pixel(x, y)[0],
        ])
    })
}
