//! SIGINT/SIGTERM handling.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag set when a termination signal arrives.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Check whether a termination signal has been received.
pub fn requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

/// Install the signal handler and return the flag it sets.
///
/// The handler only flips the flag; the frame loop checks it once per
/// iteration. Installing twice fails with `ctrlc::Error::MultipleHandlers`.
pub fn install() -> Result<&'static AtomicBool, ctrlc::Error> {
    ctrlc::set_handler(|| {
        SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
        log::info!("Termination requested, stopping after this frame");
    })?;
    Ok(&SHUTDOWN_REQUESTED)
}
