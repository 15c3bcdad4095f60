//! Terminal display surface on a ratatui terminal with crossterm backend.
//!
//! This module handles terminal lifecycle (raw mode, alternate screen,
//! cursor) and input polling, delegating drawing to the `rendering` module.

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::raw_mode::{install_panic_hook, RAW_MODE_ACTIVE};
use super::rendering;
use super::StatusBar;
use crate::display::{Display, DisplayError, DisplayEvent};
use crate::recipe::Stage;

/// Full-screen terminal surface that shows stages as half-block panels.
///
/// This struct handles:
/// - Entering raw mode and alternate screen on creation
/// - Restoring terminal state on drop
/// - Panic recovery (terminal is restored even if the app panics)
pub struct TerminalSurface {
    /// The ratatui terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status_bar: Option<StatusBar>,
    /// Number of `show` calls so far
    frames: u64,
}

impl TerminalSurface {
    /// Take over the terminal: panic hook, raw mode, alternate screen,
    /// hidden cursor.
    ///
    /// # Errors
    /// Returns an error if stdout is not a terminal or any setup step fails.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        if let Err(e) = crossterm::execute!(stdout, EnterAlternateScreen, Hide) {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            let _ = disable_raw_mode();
            return Err(e);
        }

        let mut surface = Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            status_bar: None,
            frames: 0,
        };
        surface.terminal.clear()?;
        log::debug!("Terminal surface ready ({:?})", surface.terminal.size()?);
        Ok(surface)
    }

    /// Show `status_bar` on the last row.
    pub fn with_status(mut self, status_bar: StatusBar) -> Self {
        self.status_bar = Some(status_bar);
        self
    }
}

impl Display for TerminalSurface {
    fn show(&mut self, stages: &[Stage]) -> Result<(), DisplayError> {
        self.frames += 1;
        let frames = self.frames;
        let status_bar = self.status_bar.as_ref();
        self.terminal.draw(|frame| {
            rendering::render_stages(frame, stages, status_bar, frames);
        })?;
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<DisplayEvent>, DisplayError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(DisplayEvent::Key(key))),
            Event::Resize(cols, rows) => {
                log::debug!("Terminal resized to {}x{}", cols, rows);
                Ok(Some(DisplayEvent::Resized))
            }
            _ => Ok(None),
        }
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

        // Best-effort cleanup - ignore errors during drop
        let _ = crossterm::execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}
