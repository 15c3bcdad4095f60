//! Exercise recipes: the fixed transformation order behind each command.
//!
//! A [`Recipe`] turns one acquired frame into one or more labelled
//! [`Stage`]s, each shown in its own panel.

use ab_glyph::FontVec;

use crate::buffer::ImageBuffer;
use crate::draw::{draw_shapes, Shape};
use crate::error::ConfigurationError;
use crate::transform::{
    blur, check_kernel, check_thresholds, crop, detect_edges, dilate, dilate_radius, resize,
    to_grayscale, CropRect,
};

/// A labelled image ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub label: String,
    pub image: ImageBuffer,
}

impl Stage {
    pub fn new(label: impl Into<String>, image: ImageBuffer) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }
}

/// Parameters for grayscale, blur, Canny and optional dilation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    /// Odd Gaussian kernel width
    pub blur_kernel: u32,
    pub low: f32,
    pub high: f32,
    /// Odd dilation kernel width; no dilation stage when `None`
    pub dilate_kernel: Option<u32>,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_kernel: 7,
            low: 100.0,
            high: 100.0,
            dilate_kernel: None,
        }
    }
}

/// Parameters for resize and crop. Crop applies after resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReshapeParams {
    pub resize: Option<(u32, u32)>,
    pub crop: Option<CropRect>,
}

impl Default for ReshapeParams {
    fn default() -> Self {
        Self {
            resize: Some((300, 200)),
            crop: None,
        }
    }
}

/// The transformation order of one exercise.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipe {
    /// Show frames as acquired
    Preview,
    /// Gray, blur, edges, and optionally dilation
    EdgeStudy(EdgeParams),
    /// Resize and/or crop
    Reshape(ReshapeParams),
    /// Draw shapes on the acquired canvas
    Sketch(Vec<Shape>),
}

impl Recipe {
    pub fn name(&self) -> &'static str {
        match self {
            Recipe::Preview => "preview",
            Recipe::EdgeStudy(_) => "edges",
            Recipe::Reshape(_) => "reshape",
            Recipe::Sketch(_) => "sketch",
        }
    }

    /// Check every parameter that doesn't depend on the frame.
    ///
    /// Crop bounds can only be checked against a frame, so they are left to
    /// [`Recipe::apply`].
    pub fn validate(&self, font: Option<&FontVec>) -> Result<(), ConfigurationError> {
        match self {
            Recipe::Preview => Ok(()),
            Recipe::EdgeStudy(params) => {
                check_kernel(params.blur_kernel)?;
                check_thresholds(params.low, params.high)?;
                if let Some(k) = params.dilate_kernel {
                    dilate_radius(k)?;
                }
                Ok(())
            }
            Recipe::Reshape(params) => match params.resize {
                Some((width, height)) if width == 0 || height == 0 => {
                    Err(ConfigurationError::EmptyResize { width, height })
                }
                _ => Ok(()),
            },
            Recipe::Sketch(shapes) => {
                for shape in shapes {
                    shape.validate()?;
                    if matches!(shape, Shape::Text { .. }) && font.is_none() {
                        return Err(ConfigurationError::MissingFont);
                    }
                }
                Ok(())
            }
        }
    }

    /// Run the recipe on one frame.
    pub fn apply(
        &self,
        frame: &ImageBuffer,
        font: Option<&FontVec>,
    ) -> Result<Vec<Stage>, ConfigurationError> {
        match self {
            Recipe::Preview => Ok(vec![Stage::new("Video", frame.clone())]),
            Recipe::EdgeStudy(params) => edge_study(frame, params),
            Recipe::Reshape(params) => reshape(frame, params),
            Recipe::Sketch(shapes) => Ok(vec![Stage::new(
                "Image",
                draw_shapes(frame, shapes, font)?,
            )]),
        }
    }
}

fn edge_study(frame: &ImageBuffer, params: &EdgeParams) -> Result<Vec<Stage>, ConfigurationError> {
    let gray = to_grayscale(frame);
    let blurred = blur(&gray, params.blur_kernel)?;
    let edges = detect_edges(&blurred, params.low, params.high)?;

    let dilated = params.dilate_kernel.map(|k| dilate(&edges, k)).transpose()?;

    let mut stages = vec![
        Stage::new("Gray image", gray),
        Stage::new("Blur image", blurred),
        Stage::new("Canny image", edges),
    ];
    if let Some(dilated) = dilated {
        stages.push(Stage::new("Dilation image", dilated));
    }
    Ok(stages)
}

fn reshape(frame: &ImageBuffer, params: &ReshapeParams) -> Result<Vec<Stage>, ConfigurationError> {
    let mut stages = vec![Stage::new("Image", frame.clone())];

    let resized = match params.resize {
        Some((width, height)) => {
            let resized = resize(frame, width, height)?;
            stages.push(Stage::new("Image resize", resized.clone()));
            Some(resized)
        }
        None => None,
    };

    if let Some(rect) = params.crop {
        let cropped = crop(resized.as_ref().unwrap_or(frame), rect)?;
        stages.push(Stage::new("Image crop", cropped));
    }
    Ok(stages)
}
