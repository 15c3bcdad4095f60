//! Still sources: decoded image files and blank canvases.

use std::path::{Path, PathBuf};

use super::{AcquisitionError, FrameSource};
use crate::buffer::ImageBuffer;
use crate::error::ConfigurationError;

/// An image file decoded once at open time.
#[derive(Debug, Clone)]
pub struct StillImage {
    path: PathBuf,
    image: ImageBuffer,
}

impl StillImage {
    /// Decode `path` with whatever format `image` recognises.
    ///
    /// Grayscale files stay single-channel, everything else becomes RGB.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AcquisitionError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| AcquisitionError::ImageOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let image = ImageBuffer::from_dynamic(decoded);
        log::info!(
            "Loaded {} ({}x{}, {} channel(s))",
            path.display(),
            image.width(),
            image.height(),
            image.channels()
        );
        Ok(Self {
            path: path.to_path_buf(),
            image,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for StillImage {
    fn read(&mut self) -> Result<ImageBuffer, AcquisitionError> {
        Ok(self.image.clone())
    }

    fn is_live(&self) -> bool {
        false
    }
}

/// A black RGB canvas to draw on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankCanvas {
    width: u32,
    height: u32,
}

impl BlankCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigurationError> {
        if width == 0 || height == 0 {
            return Err(ConfigurationError::EmptyCanvas { width, height });
        }
        Ok(Self { width, height })
    }
}

impl FrameSource for BlankCanvas {
    fn read(&mut self) -> Result<ImageBuffer, AcquisitionError> {
        Ok(ImageBuffer::blank(self.width, self.height))
    }

    fn is_live(&self) -> bool {
        false
    }
}
