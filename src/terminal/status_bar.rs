//! Status bar shown on the last terminal row.

/// What the status bar reports about the running session.
#[derive(Debug, Clone)]
pub struct StatusBar {
    /// Whether the status bar is visible
    pub visible: bool,
    /// Source description (file path, camera index, ...)
    pub source: String,
    /// Key that ends a live session
    pub quit_key: char,
    /// Live sources show a frame counter and the quit key
    pub live: bool,
}

impl StatusBar {
    pub fn new(source: impl Into<String>, quit_key: char, live: bool) -> Self {
        Self {
            visible: true,
            source: source.into(),
            quit_key,
            live,
        }
    }

    /// Create a status bar with the specified visibility.
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Format: " source | frame N | q: quit " for live sources,
    /// " source | any key: close " for still ones.
    pub fn format(&self, frames: u64) -> String {
        if self.live {
            format!(
                " {} | frame {} | {}: quit ",
                self.source, frames, self.quit_key
            )
        } else {
            format!(" {} | any key: close ", self.source)
        }
    }
}
