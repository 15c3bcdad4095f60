//! Subcommand handlers.
//!
//! Exercise subcommands are turned into a [`Session`] (source, recipe,
//! font) by [`plan`], merging CLI flags over the config file, and then run on
//! the terminal surface by [`run_session`].

use std::path::PathBuf;
use std::time::Duration;

use super::args::{Args, Command, ConfigAction};
use crate::camera;
use crate::capture::{open_source, Source};
use crate::config::{default_path, Config};
use crate::display::DisplayError;
use crate::draw::load_font;
use crate::error::FrameLoopError;
use crate::frame_loop::{FrameLoop, LoopOptions, LoopReport};
use crate::recipe::{EdgeParams, Recipe, ReshapeParams};
use crate::shutdown;
use crate::terminal::{StatusBar, TerminalSurface};

/// Everything one exercise run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub source: Source,
    pub recipe: Recipe,
    pub font: Option<PathBuf>,
}

/// Build the session for an exercise subcommand. CLI flags win over `config`.
///
/// Returns `None` for subcommands that don't open a display.
pub fn plan(command: &Command, config: &Config) -> Option<Session> {
    let session = match command {
        Command::Webcam {
            device,
            width,
            height,
            brightness,
            no_brightness,
        } => {
            let mut settings = config.camera.settings();
            if let Some(device) = device {
                settings.device_index = *device;
            }
            if let Some(width) = width {
                settings.resolution.width = *width;
            }
            if let Some(height) = height {
                settings.resolution.height = *height;
            }
            if brightness.is_some() {
                settings.brightness = *brightness;
            }
            if *no_brightness {
                settings.brightness = None;
            }
            Session {
                source: Source::Camera(settings),
                recipe: Recipe::Preview,
                font: None,
            }
        }
        Command::Video { path } => Session {
            source: Source::Video(path.clone()),
            recipe: Recipe::Preview,
            font: None,
        },
        Command::Edges {
            image,
            blur,
            low,
            high,
            dilate,
        } => {
            let defaults = config.edges.params();
            Session {
                source: Source::Still(image.clone()),
                recipe: Recipe::EdgeStudy(EdgeParams {
                    blur_kernel: blur.unwrap_or(defaults.blur_kernel),
                    low: low.unwrap_or(defaults.low),
                    high: high.unwrap_or(defaults.high),
                    dilate_kernel: dilate.or(defaults.dilate_kernel),
                }),
                font: None,
            }
        }
        Command::Resize {
            image,
            width,
            height,
            crop,
        } => Session {
            source: Source::Still(image.clone()),
            recipe: Recipe::Reshape(ReshapeParams {
                resize: Some((
                    width.unwrap_or(config.reshape.width),
                    height.unwrap_or(config.reshape.height),
                )),
                crop: crop.or(config.reshape.crop),
            }),
            font: None,
        },
        Command::Shapes {
            width,
            height,
            font,
        } => {
            let mut canvas = config.canvas.clone();
            canvas.width = width.unwrap_or(canvas.width);
            canvas.height = height.unwrap_or(canvas.height);
            Session {
                source: Source::Blank {
                    width: canvas.width,
                    height: canvas.height,
                },
                recipe: Recipe::Sketch(canvas.shapes_or_default()),
                font: font.clone().or(canvas.font),
            }
        }
        Command::ListCameras | Command::Config { .. } => return None,
    };
    Some(session)
}

/// Loop options from the config file and global flags.
pub fn loop_options(args: &Args, config: &Config) -> LoopOptions {
    LoopOptions {
        quit_key: args.quit_key.unwrap_or(config.display.quit_key),
        poll_timeout: Duration::from_millis(config.display.poll_ms),
    }
}

/// Entry point for a parsed command line.
pub fn run(args: Args) -> Result<(), FrameLoopError> {
    match &args.command {
        Command::Config { action } => return handle_config_action(*action, &args),
        Command::ListCameras => return list_cameras(),
        _ => {}
    }

    let config = Config::load(args.config.as_deref())?;
    let Some(session) = plan(&args.command, &config) else {
        return Ok(());
    };
    let options = loop_options(&args, &config);
    let show_status = config.display.status_bar && !args.no_status;

    let report = run_session(session, options, show_status)?;
    log::info!("{} frame(s) shown, stopped by {:?}", report.frames, report.reason);
    Ok(())
}

/// Open the source, take over the terminal and run the frame loop.
///
/// The source is opened and the recipe checked before the terminal switches
/// to the alternate screen, so setup errors print on a normal terminal. The
/// surface is dropped inside the loop, restoring the terminal before any
/// error reaches the caller.
pub fn run_session(
    session: Session,
    options: LoopOptions,
    show_status: bool,
) -> Result<LoopReport, FrameLoopError> {
    let font = session.font.as_deref().map(load_font).transpose()?;
    session.recipe.validate(font.as_ref())?;

    let shutdown = shutdown::install()?;
    let source = open_source(&session.source)?;

    let label = status_label(&session.source, source.detail());
    let status_bar =
        StatusBar::new(label, options.quit_key, source.is_live()).with_visibility(show_status);
    let surface = TerminalSurface::new()
        .map_err(DisplayError::from)?
        .with_status(status_bar);

    FrameLoop::new(session.recipe, font.as_ref(), options, shutdown).run(source, surface)
}

/// Status bar text: the source, plus what it actually delivers if known.
fn status_label(source: &Source, detail: Option<String>) -> String {
    match detail {
        Some(detail) => format!("{} ({})", source, detail),
        None => source.to_string(),
    }
}

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), FrameLoopError> {
    let devices = camera::list_devices().map_err(crate::capture::AcquisitionError::from)?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use `frameloop webcam --device <index>` to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, args: &Args) -> Result<(), FrameLoopError> {
    let config_path = args.config.clone().unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            let config = Config::load(args.config.as_deref())?;
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found, showing defaults)", config_path.display());
            }
            println!();
            print!("{}", toml::to_string_pretty(&config).map_err(crate::config::ConfigError::from)?);
        }
        ConfigAction::Init => {
            Config::write_template(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}
