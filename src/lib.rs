//! frameloop library crate.
//!
//! Acquire an image (file, blank canvas, camera or video), run one of the
//! exercise recipes over it and show every stage in the terminal.

pub mod buffer;
pub mod camera;
pub mod capture;
pub mod cli;
pub mod config;
pub mod display;
pub mod draw;
pub mod error;
pub mod frame_loop;
pub mod recipe;
pub mod shutdown;
pub mod terminal;
pub mod transform;

pub use buffer::ImageBuffer;
pub use error::{ConfigurationError, FrameLoopError};
