//! Camera capture handle.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, ControlValueSetter, FrameFormat as NokhwaFrameFormat,
    KnownCameraControl, RequestedFormat, RequestedFormatType,
};
use nokhwa::Camera;

use super::device::find_device;
use super::frame_utils::convert_to_rgb;
use super::types::{CameraError, CameraSettings, Resolution};
use crate::buffer::ImageBuffer;

/// An open camera stream.
///
/// The stream is opened by [`CameraCapture::open`] and stopped when the
/// handle is dropped, so every exit path releases the device exactly once.
/// [`CameraCapture::read`] blocks until the camera delivers the next frame.
pub struct CameraCapture {
    camera: Camera,
    settings: CameraSettings,
    /// Resolution the camera actually chose
    actual_resolution: Resolution,
    /// Frame rate the camera actually chose
    actual_fps: u32,
}

impl std::fmt::Debug for CameraCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraCapture")
            .field("settings", &self.settings)
            .field("actual_resolution", &self.actual_resolution)
            .field("actual_fps", &self.actual_fps)
            .finish_non_exhaustive()
    }
}

impl CameraCapture {
    /// Open the camera described by `settings` and start streaming.
    ///
    /// # Errors
    /// * `CameraError::DeviceNotFound` - If the device index doesn't exist
    /// * `CameraError::PermissionDenied` - If camera access is denied (macOS)
    /// * `CameraError::OpenFailed` - If the camera fails to open for other reasons
    /// * `CameraError::StreamFailed` - If the camera stream fails to start
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let info = find_device(settings.device_index)?;
        log::info!("Opening camera {}", info);

        let index = CameraIndex::Index(settings.device_index);
        let mut camera = open_camera_with_fallback(&index, &settings)?;
        camera
            .open_stream()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;

        if let Some(brightness) = settings.brightness {
            apply_brightness(&mut camera, brightness);
        }

        let res = camera.resolution();
        let actual_resolution = Resolution {
            width: res.width(),
            height: res.height(),
        };
        let actual_fps = camera.frame_rate();
        log::info!(
            "Camera streaming at {} @ {} fps (requested {})",
            actual_resolution,
            actual_fps,
            settings.resolution
        );

        Ok(Self {
            camera,
            settings,
            actual_resolution,
            actual_fps,
        })
    }

    /// Resolution the camera is delivering, which may differ from the request.
    pub fn actual_resolution(&self) -> Resolution {
        self.actual_resolution
    }

    pub fn actual_fps(&self) -> u32 {
        self.actual_fps
    }

    /// Block until the next frame arrives and return it as RGB.
    pub fn read(&mut self) -> Result<ImageBuffer, CameraError> {
        let raw = self
            .camera
            .frame()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;
        Ok(ImageBuffer::Color(convert_to_rgb(&raw)?))
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("Failed to stop camera stream: {}", e);
        } else {
            log::debug!("Camera {} released", self.settings.device_index);
        }
    }
}

/// Set the brightness control. Cameras without the control keep their default.
fn apply_brightness(camera: &mut Camera, value: i64) {
    match camera.set_camera_control(
        KnownCameraControl::Brightness,
        ControlValueSetter::Integer(value),
    ) {
        Ok(()) => log::debug!("Camera brightness set to {}", value),
        Err(e) => log::warn!("Camera brightness not applied: {}", e),
    }
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let requested_resolution =
        nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height);

    // In order of preference:
    // 1. Closest match with NV12 (native on macOS)
    // 2. Closest match with MJPEG (widely supported)
    // 3. Highest resolution available (let the camera decide the format)
    let format_attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_resolution,
            NokhwaFrameFormat::NV12,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_resolution,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = String::from("no format attempted");

    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("Camera format attempt failed: {}", e);
                last_error = e.to_string();
            }
        }
    }

    let msg = last_error.to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("access")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed(last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_open_invalid_device() {
        // Use a device index that is very unlikely to exist
        let settings = CameraSettings {
            device_index: 999,
            ..CameraSettings::default()
        };
        match CameraCapture::open(settings) {
            Err(CameraError::DeviceNotFound(idx)) => assert_eq!(idx, 999),
            Err(CameraError::QueryFailed(_)) => {}
            other => panic!("Expected DeviceNotFound, got {:?}", other),
        }
    }
}
