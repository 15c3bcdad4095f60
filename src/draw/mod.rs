//! Drawing primitives rendered onto image buffers.
//!
//! Shapes are described by [`Shape`] values (loadable from the config file)
//! and rasterised onto a copy of the canvas by [`draw_shapes`].

mod font;
mod raster;
mod shape;

pub use font::load_font;
pub use raster::draw_shapes;
pub use shape::{default_sketch, Color, Point, Shape};
