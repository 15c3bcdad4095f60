//! CLI argument parsing with clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::transform::CropRect;

/// Capture, transform and view images in the terminal
#[derive(Parser, Debug)]
#[command(name = "frameloop")]
#[command(version, about = "Webcam, resize/crop, grayscale, blur, edges and shapes in the terminal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Key that ends a live session (default: q)
    #[arg(long, global = true)]
    pub quit_key: Option<char>,

    /// Hide status bar
    #[arg(long, global = true)]
    pub no_status: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the live webcam feed
    Webcam {
        /// Camera device index (from list-cameras)
        #[arg(long)]
        device: Option<u32>,
        /// Requested capture width
        #[arg(long)]
        width: Option<u32>,
        /// Requested capture height
        #[arg(long)]
        height: Option<u32>,
        /// Brightness control value
        #[arg(long, allow_negative_numbers = true)]
        brightness: Option<i64>,
        /// Leave the camera's brightness alone
        #[arg(long, conflicts_with = "brightness")]
        no_brightness: bool,
    },
    /// Play a video file
    Video {
        /// Video file (decoded by ffmpeg)
        path: PathBuf,
    },
    /// Gray, blurred and Canny edge views of an image
    Edges {
        image: PathBuf,
        /// Gaussian kernel size (odd)
        #[arg(long)]
        blur: Option<u32>,
        /// Canny low threshold
        #[arg(long)]
        low: Option<f32>,
        /// Canny high threshold
        #[arg(long)]
        high: Option<f32>,
        /// Also show the edges dilated with this kernel size (odd)
        #[arg(long)]
        dilate: Option<u32>,
    },
    /// Resize and crop an image
    Resize {
        image: PathBuf,
        /// Target width
        #[arg(long)]
        width: Option<u32>,
        /// Target height
        #[arg(long)]
        height: Option<u32>,
        /// Crop the resized image, as X0:X1,Y0:Y1
        #[arg(long)]
        crop: Option<CropRect>,
    },
    /// Draw shapes on a blank canvas
    Shapes {
        /// Canvas width
        #[arg(long)]
        width: Option<u32>,
        /// Canvas height
        #[arg(long)]
        height: Option<u32>,
        /// TTF/OTF font for text shapes
        #[arg(long)]
        font: Option<PathBuf>,
    },
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
