//! Configuration file handling for frameloop.
//!
//! Loads configuration from `~/.config/frameloop/config.toml` (platform
//! equivalent) or a custom path. Every field has a default, so a missing
//! file or a partial one is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::camera::{CameraSettings, Resolution};
use crate::draw::{default_sketch, Shape};
use crate::recipe::{EdgeParams, ReshapeParams};
use crate::transform::CropRect;

/// Configuration file structure for frameloop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub edges: EdgesConfig,
    pub reshape: ReshapeConfig,
    pub display: DisplayConfig,
    pub canvas: CanvasConfig,
}

/// `[camera]`: webcam exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Omit to leave the camera's brightness alone
    pub brightness: Option<i64>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            width: 640,
            height: 480,
            fps: 30,
            brightness: Some(80),
        }
    }
}

impl CameraConfig {
    pub fn settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.device,
            resolution: Resolution {
                width: self.width,
                height: self.height,
            },
            fps: self.fps,
            brightness: self.brightness,
        }
    }
}

/// `[edges]`: grayscale, blur, Canny, dilation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgesConfig {
    pub blur: u32,
    pub low: f32,
    pub high: f32,
    pub dilate: Option<u32>,
}

impl Default for EdgesConfig {
    fn default() -> Self {
        let params = EdgeParams::default();
        Self {
            blur: params.blur_kernel,
            low: params.low,
            high: params.high,
            dilate: params.dilate_kernel,
        }
    }
}

impl EdgesConfig {
    pub fn params(&self) -> EdgeParams {
        EdgeParams {
            blur_kernel: self.blur,
            low: self.low,
            high: self.high,
            dilate_kernel: self.dilate,
        }
    }
}

/// `[reshape]`: resize target and optional crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReshapeConfig {
    pub width: u32,
    pub height: u32,
    pub crop: Option<CropRect>,
}

impl Default for ReshapeConfig {
    fn default() -> Self {
        let (width, height) = ReshapeParams::default().resize.unwrap_or((300, 200));
        Self {
            width,
            height,
            crop: None,
        }
    }
}

/// `[canvas]`: shapes exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// TTF/OTF font for text shapes
    pub font: Option<PathBuf>,
    /// `[[canvas.shapes]]` entries; the two default lines when absent
    pub shapes: Option<Vec<Shape>>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            font: None,
            shapes: None,
        }
    }
}

impl CanvasConfig {
    /// Configured shapes, or the default sketch sized to this canvas.
    pub fn shapes_or_default(&self) -> Vec<Shape> {
        self.shapes
            .clone()
            .unwrap_or_else(|| default_sketch(self.width, self.height))
    }
}

/// `[display]`: terminal surface and loop options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub quit_key: char,
    pub status_bar: bool,
    /// Key poll timeout per live frame, in milliseconds
    pub poll_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            quit_key: 'q',
            status_bar: true,
            poll_ms: 1,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is tried
    /// and a missing file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let path = default_path();
                if path.exists() {
                    Self::load_file(&path)
                } else {
                    log::debug!("No config at {}, using defaults", path.display());
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Defaults as TOML, with the default shapes written out.
    pub fn template() -> Result<String, ConfigError> {
        let mut config = Config::default();
        config.canvas.shapes = Some(config.canvas.shapes_or_default());
        Ok(toml::to_string_pretty(&config)?)
    }

    /// Write [`Config::template`] to `path`, refusing to overwrite.
    pub fn write_template(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        let template = Self::template()?;
        let write_err = |e: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, template).map_err(write_err)?;
        log::info!("Wrote config template to {}", path.display());
        Ok(())
    }
}

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to write config file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("com", "frameloop", "frameloop")
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/frameloop/config.toml")
        })
}
