//! Frame acquisition.
//!
//! Every input the loop can read from implements [`FrameSource`]:
//! - [`StillImage`]: an image file, decoded once
//! - [`BlankCanvas`]: a black canvas for drawing
//! - [`CameraSource`]: a live camera stream
//! - [`VideoFile`]: a video file decoded by ffmpeg
//!
//! [`open_source`] turns a [`Source`] description into a boxed source.

mod errors;
mod still;
mod video;

use std::fmt;
use std::path::PathBuf;

pub use errors::AcquisitionError;
pub use still::{BlankCanvas, StillImage};
pub use video::VideoFile;

use crate::buffer::ImageBuffer;
use crate::camera::{CameraCapture, CameraSettings};
use crate::error::FrameLoopError;

/// Something the frame loop can pull images from.
pub trait FrameSource {
    /// Acquire one image. Live sources block until the next frame arrives.
    fn read(&mut self) -> Result<ImageBuffer, AcquisitionError>;

    /// Live sources are read repeatedly, still sources once.
    fn is_live(&self) -> bool;

    /// What the source actually delivers, when it may differ from the request.
    fn detail(&self) -> Option<String> {
        None
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> Result<ImageBuffer, AcquisitionError> {
        (**self).read()
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }

    fn detail(&self) -> Option<String> {
        (**self).detail()
    }
}

/// Where frames come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// An image file
    Still(PathBuf),
    /// A black canvas of the given size
    Blank { width: u32, height: u32 },
    /// A camera by index
    Camera(CameraSettings),
    /// A video file
    Video(PathBuf),
}

impl Source {
    pub fn is_live(&self) -> bool {
        matches!(self, Source::Camera(_) | Source::Video(_))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Still(path) => write!(f, "{}", path.display()),
            Source::Blank { width, height } => write!(f, "blank {}x{}", width, height),
            Source::Camera(settings) => write!(f, "camera {}", settings.device_index),
            Source::Video(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A camera stream as a frame source.
#[derive(Debug)]
pub struct CameraSource(CameraCapture);

impl CameraSource {
    pub fn open(settings: CameraSettings) -> Result<Self, AcquisitionError> {
        Ok(Self(CameraCapture::open(settings)?))
    }
}

impl FrameSource for CameraSource {
    fn read(&mut self) -> Result<ImageBuffer, AcquisitionError> {
        Ok(self.0.read()?)
    }

    fn is_live(&self) -> bool {
        true
    }

    fn detail(&self) -> Option<String> {
        Some(format!(
            "{} @ {} fps",
            self.0.actual_resolution(),
            self.0.actual_fps()
        ))
    }
}

/// Open the capture handle or decode the file behind `source`.
pub fn open_source(source: &Source) -> Result<Box<dyn FrameSource>, FrameLoopError> {
    log::debug!("Opening source: {}", source);
    let opened: Box<dyn FrameSource> = match source {
        Source::Still(path) => Box::new(StillImage::open(path)?),
        Source::Blank { width, height } => Box::new(BlankCanvas::new(*width, *height)?),
        Source::Camera(settings) => Box::new(CameraSource::open(settings.clone())?),
        Source::Video(path) => Box::new(VideoFile::open(path)?),
    };
    Ok(opened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn test_source_liveness() {
        assert!(!Source::Still(PathBuf::from("a.png")).is_live());
        assert!(!Source::Blank { width: 1, height: 1 }.is_live());
        assert!(Source::Camera(CameraSettings::default()).is_live());
        assert!(Source::Video(PathBuf::from("a.mp4")).is_live());
    }

    #[test]
    fn test_source_display() {
        let blank = Source::Blank {
            width: 512,
            height: 512,
        };
        assert_eq!(blank.to_string(), "blank 512x512");
        assert_eq!(
            Source::Camera(CameraSettings::default()).to_string(),
            "camera 0"
        );
    }

    #[test]
    fn test_open_blank_source() {
        let mut source = open_source(&Source::Blank {
            width: 8,
            height: 6,
        })
        .unwrap();
        assert!(!source.is_live());
        assert_eq!(source.read().unwrap().dimensions(), (8, 6));
    }

    #[test]
    fn test_open_empty_blank_source() {
        let err = open_source(&Source::Blank {
            width: 0,
            height: 0,
        })
        .err()
        .unwrap();
        assert!(matches!(
            err,
            FrameLoopError::Configuration(ConfigurationError::EmptyCanvas { .. })
        ));
    }

    #[test]
    fn test_open_missing_still_source() {
        let err = open_source(&Source::Still(PathBuf::from("missing.jpg")))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            FrameLoopError::Acquisition(AcquisitionError::ImageOpen { .. })
        ));
    }
}
