//! Camera device enumeration.

use nokhwa::query;
use nokhwa::utils::ApiBackend;

use super::types::{CameraError, CameraInfo};

/// List camera devices addressable by integer index, sorted by index.
///
/// An empty list (no cameras attached) is not an error. Devices that the
/// backend only exposes by name are skipped.
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;

    let mut cameras: Vec<CameraInfo> = devices
        .into_iter()
        .filter_map(|d| {
            let index = d.index().as_index().ok()?;
            Some(CameraInfo {
                index,
                name: d.human_name(),
                description: d.description().to_string(),
            })
        })
        .collect();
    cameras.sort_by_key(|c| c.index);

    log::debug!("Found {} camera(s)", cameras.len());
    Ok(cameras)
}

/// Look up the device at `index`.
pub fn find_device(index: u32) -> Result<CameraInfo, CameraError> {
    list_devices()?
        .into_iter()
        .find(|d| d.index == index)
        .ok_or(CameraError::DeviceNotFound(index))
}
