//! Error types shared across the crate.
//!
//! Acquisition failures live in [`crate::capture`], terminal failures in
//! [`crate::display`] and config file failures in [`crate::config`]; this
//! module holds the transformation parameter errors and the umbrella type the
//! frame loop returns.

use std::path::PathBuf;

use crate::capture::AcquisitionError;
use crate::config::ConfigError;
use crate::display::DisplayError;
use crate::transform::CropRect;

/// Invalid transformation or drawing parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Crop {rect} does not fit inside a {width}x{height} image")]
    CropOutOfBounds {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    #[error("Resize target {width}x{height} must be non-zero")]
    EmptyResize { width: u32, height: u32 },

    #[error("Canvas size {width}x{height} must be non-zero")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Kernel size {0} must be odd and at least 1 (at most 511 for dilation)")]
    InvalidKernel(u32),

    #[error("Edge thresholds must be non-negative with low <= high (got low={low}, high={high})")]
    InvalidThresholds { low: f32, high: f32 },

    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Text shapes need a font. Pass --font or set canvas.font in the config file")]
    MissingFont,

    #[error("Failed to load font '{}': {reason}", path.display())]
    Font { path: PathBuf, reason: String },
}

/// Anything that can end a frame loop run.
#[derive(Debug, thiserror::Error)]
pub enum FrameLoopError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
