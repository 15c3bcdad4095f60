//! Display surfaces that show recipe stages and report key presses and
//! resizes.

use std::io;
use std::time::Duration;

pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::recipe::Stage;

/// Errors from drawing to or reading keys from a display surface.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Input reported by a display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// The surface changed size and whatever is shown must be drawn again
    Resized,
}

/// Somewhere to show stages and poll input from.
pub trait Display {
    /// Replace whatever is shown with `stages`, one panel per stage.
    fn show(&mut self, stages: &[Stage]) -> Result<(), DisplayError>;

    /// Wait up to `timeout` for a key press or a resize.
    ///
    /// `None` means nothing arrived in time. Key releases and repeats are
    /// not reported.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<DisplayEvent>, DisplayError>;
}

impl<D: Display + ?Sized> Display for &mut D {
    fn show(&mut self, stages: &[Stage]) -> Result<(), DisplayError> {
        (**self).show(stages)
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<DisplayEvent>, DisplayError> {
        (**self).poll_event(timeout)
    }
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn show(&mut self, stages: &[Stage]) -> Result<(), DisplayError> {
        (**self).show(stages)
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<DisplayEvent>, DisplayError> {
        (**self).poll_event(timeout)
    }
}
