//! Error types for frame acquisition.

use std::path::PathBuf;

use crate::camera::CameraError;

/// Errors that can occur while acquiring a frame from any source.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    /// Image file missing or not decodable
    #[error("Failed to open image '{}': {source}", path.display())]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Camera failure (open, permission, stream)
    #[error(transparent)]
    Camera(#[from] CameraError),

    /// Video file missing or not probeable
    #[error("Failed to open video '{}': {reason}", path.display())]
    VideoOpen { path: PathBuf, reason: String },

    /// ffmpeg/ffprobe not on PATH
    #[error("FFmpeg not found. Install ffmpeg (it ships ffprobe) to read video files")]
    FfmpegNotFound,

    /// Reading from the decoder failed
    #[error("Video stream failed: {0}")]
    StreamFailed(String),

    /// The source has no more frames
    #[error("Video stream ended")]
    StreamEnded,
}
