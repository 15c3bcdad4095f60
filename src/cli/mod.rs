//! Command-line interface definitions and handlers.

mod args;
mod commands;

pub use args::{Args, Command, ConfigAction};
pub use commands::{handle_config_action, list_cameras, loop_options, plan, run, run_session, Session};
