//! Frame conversion utilities.

use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;

use super::types::CameraError;

/// Convert a nokhwa buffer to an RGB image.
///
/// Handles various camera formats (MJPEG, YUYV, NV12, etc.) by using
/// nokhwa's built-in decode_image which automatically converts from
/// the camera's native format to RGB.
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Result<RgbImage, CameraError> {
    let decoded = buffer
        .decode_image::<RgbFormat>()
        .map_err(|e| CameraError::DecodeFailed(e.to_string()))?;
    let resolution = buffer.resolution();

    rgb_from_raw(resolution.width(), resolution.height(), decoded.into_raw())
}

/// Wrap raw RGB24 bytes, checking the length against the dimensions.
pub fn rgb_from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<RgbImage, CameraError> {
    let len = data.len();
    RgbImage::from_raw(width, height, data).ok_or_else(|| {
        CameraError::DecodeFailed(format!(
            "{} bytes is not a {}x{} RGB frame",
            len, width, height
        ))
    })
}
