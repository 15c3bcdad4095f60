//! Shape descriptions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::transform::luma;

/// Pixel coordinate `(x, y)`. May lie outside the canvas; drawing clips.
pub type Point = (i32, i32);

/// RGB colour, written as `[r, g, b]` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const YELLOW: Color = Color([255, 255, 0]);
    pub const RED: Color = Color([255, 0, 0]);
    pub const GREEN: Color = Color([0, 255, 0]);
    pub const BLUE: Color = Color([0, 0, 255]);
    pub const WHITE: Color = Color([255, 255, 255]);

    /// Gray level used when drawing on single-channel canvases.
    pub fn luma(&self) -> u8 {
        luma(self.0)
    }
}

fn default_thickness() -> i32 {
    1
}

fn default_text_size() -> f32 {
    32.0
}

/// A drawing primitive.
///
/// `thickness` is the stroke width in pixels. For rectangles and circles a
/// negative thickness fills the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Straight segment between two points, inclusive
    Line {
        from: Point,
        to: Point,
        color: Color,
        #[serde(default = "default_thickness")]
        thickness: i32,
    },
    /// Axis-aligned rectangle with inclusive corners
    Rectangle {
        top_left: Point,
        bottom_right: Point,
        color: Color,
        #[serde(default = "default_thickness")]
        thickness: i32,
    },
    Circle {
        center: Point,
        radius: i32,
        color: Color,
        #[serde(default = "default_thickness")]
        thickness: i32,
    },
    /// Text whose glyph box starts at `origin` (top-left)
    Text {
        origin: Point,
        text: String,
        color: Color,
        /// Glyph height in pixels
        #[serde(default = "default_text_size")]
        size: f32,
    },
    /// Solid block covering columns `top_left.0..bottom_right.0` and rows
    /// `top_left.1..bottom_right.1` (end exclusive)
    Fill {
        top_left: Point,
        bottom_right: Point,
        color: Color,
    },
}

impl Shape {
    pub fn color(&self) -> Color {
        match self {
            Shape::Line { color, .. }
            | Shape::Rectangle { color, .. }
            | Shape::Circle { color, .. }
            | Shape::Text { color, .. }
            | Shape::Fill { color, .. } => *color,
        }
    }

    /// Lowercase name used in messages and config files.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Line { .. } => "line",
            Shape::Rectangle { .. } => "rectangle",
            Shape::Circle { .. } => "circle",
            Shape::Text { .. } => "text",
            Shape::Fill { .. } => "fill",
        }
    }

    /// Check parameters that no canvas could satisfy.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = |msg: String| Err(ConfigurationError::InvalidShape(msg));
        match self {
            Shape::Line { thickness, .. } if *thickness <= 0 => {
                invalid(format!("line thickness must be positive, got {}", thickness))
            }
            Shape::Rectangle { thickness: 0, .. } | Shape::Circle { thickness: 0, .. } => {
                invalid(format!("{} thickness must not be 0", self.kind()))
            }
            Shape::Circle { radius, .. } if *radius < 0 => {
                invalid(format!("circle radius must not be negative, got {}", radius))
            }
            Shape::Text { size, .. } if !size.is_finite() || *size <= 0.0 => {
                invalid(format!("text size must be positive, got {}", size))
            }
            Shape::Fill {
                top_left,
                bottom_right,
                ..
            } if bottom_right.0 <= top_left.0 || bottom_right.1 <= top_left.1 => invalid(format!(
                "fill {:?}..{:?} is empty",
                top_left, bottom_right
            )),
            _ => Ok(()),
        }
    }
}

/// The shapes drawn by the default `shapes` exercise on a 512x512 canvas:
/// a short yellow diagonal and one spanning the whole canvas.
pub fn default_sketch(width: u32, height: u32) -> Vec<Shape> {
    vec![
        Shape::Line {
            from: (0, 0),
            to: (300, 300),
            color: Color::YELLOW,
            thickness: 3,
        },
        Shape::Line {
            from: (0, 0),
            to: (width as i32, height as i32),
            color: Color::YELLOW,
            thickness: 3,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_luma() {
        assert_eq!(Color::WHITE.luma(), 255);
        assert_eq!(Color::RED.luma(), 76);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        for shape in default_sketch(512, 512) {
            assert!(shape.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let line = Shape::Line {
            from: (0, 0),
            to: (1, 1),
            color: Color::RED,
            thickness: -1,
        };
        assert!(line.validate().is_err());

        let circle = Shape::Circle {
            center: (5, 5),
            radius: -3,
            color: Color::RED,
            thickness: 1,
        };
        assert!(circle.validate().is_err());

        let rect = Shape::Rectangle {
            top_left: (0, 0),
            bottom_right: (4, 4),
            color: Color::RED,
            thickness: 0,
        };
        assert!(rect.validate().is_err());

        let fill = Shape::Fill {
            top_left: (5, 5),
            bottom_right: (5, 9),
            color: Color::RED,
        };
        assert!(fill.validate().is_err());
    }

    #[test]
    fn test_shape_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            shapes: Vec<Shape>,
        }

        let doc: Doc = toml::from_str(
            r#"
            [[shapes]]
            kind = "line"
            from = [0, 0]
            to = [300, 300]
            color = [255, 255, 0]
            thickness = 3

            [[shapes]]
            kind = "circle"
            center = [100, 100]
            radius = 20
            color = [0, 0, 255]
            "#,
        )
        .unwrap();

        assert_eq!(doc.shapes.len(), 2);
        assert_eq!(doc.shapes[0], default_sketch(300, 300)[0]);
        match &doc.shapes[1] {
            Shape::Circle { thickness, .. } => assert_eq!(*thickness, 1),
            other => panic!("Expected circle, got {:?}", other),
        }
    }
}
