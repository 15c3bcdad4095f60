//! The acquire, transform, render loop.
//!
//! Still sources are rendered once and stay on screen until any key is
//! pressed; a resize redraws them. Live sources are read, transformed and rendered repeatedly until
//! the quit key is pressed, a termination signal arrives, or a read fails.
//! There are no retries: the first acquisition error ends the run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use ab_glyph::FontVec;

use crate::capture::FrameSource;
use crate::display::{Display, DisplayEvent, KeyCode, KeyEvent, KeyModifiers};
use crate::error::FrameLoopError;
use crate::recipe::{Recipe, Stage};

/// How often a still source checks the termination flag while waiting.
const DISMISS_POLL: Duration = Duration::from_millis(100);

/// Loop tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Key that stops a live source (case-sensitive)
    pub quit_key: char,
    /// How long each live iteration waits for a key
    pub poll_timeout: Duration,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            quit_key: 'q',
            poll_timeout: Duration::from_millis(1),
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The quit key was pressed on a live source
    QuitKey,
    /// A key was pressed on a still source
    Dismissed,
    /// SIGINT/SIGTERM or Ctrl+C
    Interrupted,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    /// Frames rendered
    pub frames: u64,
    pub reason: StopReason,
}

/// True when `key` is the quit key with no Ctrl/Alt held.
pub fn should_stop(key: Option<&KeyEvent>, quit_key: char) -> bool {
    key.is_some_and(|k| {
        k.code == KeyCode::Char(quit_key)
            && !k.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    })
}

/// Ctrl+C arrives as a key in raw mode instead of as SIGINT.
fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// One configured run: recipe, optional font, options and the shutdown flag.
pub struct FrameLoop<'a> {
    recipe: Recipe,
    font: Option<&'a FontVec>,
    options: LoopOptions,
    shutdown: &'a AtomicBool,
}

impl<'a> FrameLoop<'a> {
    pub fn new(
        recipe: Recipe,
        font: Option<&'a FontVec>,
        options: LoopOptions,
        shutdown: &'a AtomicBool,
    ) -> Self {
        Self {
            recipe,
            font,
            options,
            shutdown,
        }
    }

    /// Run until a stop condition, consuming the source and the display.
    ///
    /// Both are dropped before this returns, on success and on error.
    pub fn run<S, D>(&self, mut source: S, mut display: D) -> Result<LoopReport, FrameLoopError>
    where
        S: FrameSource,
        D: Display,
    {
        self.recipe.validate(self.font)?;
        log::debug!(
            "Running {} recipe on a {} source",
            self.recipe.name(),
            if source.is_live() { "live" } else { "still" }
        );

        let report = if source.is_live() {
            self.run_live(&mut source, &mut display)
        } else {
            self.run_still(&mut source, &mut display)
        };
        // Release the terminal before anything else is logged
        drop(display);
        drop(source);
        let report = report?;

        log::info!(
            "Stopped after {} frame(s): {:?}",
            report.frames,
            report.reason
        );
        Ok(report)
    }

    fn interrupted(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    fn render_one<S, D>(
        &self,
        source: &mut S,
        display: &mut D,
    ) -> Result<Vec<Stage>, FrameLoopError>
    where
        S: FrameSource,
        D: Display,
    {
        let frame = source.read()?;
        let stages = self.recipe.apply(&frame, self.font)?;
        display.show(&stages)?;
        Ok(stages)
    }

    fn run_still<S, D>(&self, source: &mut S, display: &mut D) -> Result<LoopReport, FrameLoopError>
    where
        S: FrameSource,
        D: Display,
    {
        let stages = self.render_one(source, display)?;

        let reason = loop {
            if self.interrupted() {
                break StopReason::Interrupted;
            }
            match display.poll_event(DISMISS_POLL)? {
                Some(DisplayEvent::Key(key)) => {
                    log::debug!("Dismissed with {:?}", key.code);
                    break if is_interrupt(&key) {
                        StopReason::Interrupted
                    } else {
                        StopReason::Dismissed
                    };
                }
                Some(DisplayEvent::Resized) => display.show(&stages)?,
                None => {}
            }
        };

        Ok(LoopReport { frames: 1, reason })
    }

    fn run_live<S, D>(&self, source: &mut S, display: &mut D) -> Result<LoopReport, FrameLoopError>
    where
        S: FrameSource,
        D: Display,
    {
        let mut frames = 0u64;
        let reason = loop {
            if self.interrupted() {
                break StopReason::Interrupted;
            }

            self.render_one(source, display)?;
            frames += 1;

            // The next frame is drawn at the new size anyway
            let key = match display.poll_event(self.options.poll_timeout)? {
                Some(DisplayEvent::Key(key)) => Some(key),
                Some(DisplayEvent::Resized) | None => None,
            };
            if key.as_ref().is_some_and(is_interrupt) {
                break StopReason::Interrupted;
            }
            if should_stop(key.as_ref(), self.options.quit_key) {
                break StopReason::QuitKey;
            }
        };

        Ok(LoopReport { frames, reason })
    }
}
