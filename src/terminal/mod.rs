//! Terminal display surface - raw mode, layout, half-block panels and cleanup.

mod frame;
mod panel;
mod raw_mode;
mod rendering;
mod status_bar;
mod tui;

// Re-export public types from submodules
pub use frame::{fit_within, CellColor, HalfBlock, HalfBlockFrame, UPPER_HALF_BLOCK};
pub use panel::StagePanel;
pub use rendering::{render_stages, render_status_bar};
pub use status_bar::StatusBar;
pub use tui::TerminalSurface;
