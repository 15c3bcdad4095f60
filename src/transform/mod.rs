//! Stateless image transformations.
//!
//! Every function takes an [`ImageBuffer`](crate::buffer::ImageBuffer) by
//! reference and returns a new one; nothing here keeps state between calls.
//!
//! 1. **Grayscale** - RGB to luminance using BT.601
//! 2. **Blur** - Gaussian blur sized by an odd kernel
//! 3. **Edges** - Canny edge detection
//! 4. **Dilate** - square-kernel morphological dilation
//! 5. **Geometry** - exact resize and bounds-checked crop

mod edges;
mod filter;
mod geometry;
mod grayscale;

pub use edges::detect_edges;
pub use filter::{blur, dilate, sigma_for_kernel};
pub use geometry::{crop, resize, CropRect};
pub use grayscale::{luma, to_grayscale};

pub(crate) use edges::check_thresholds;
pub(crate) use filter::{check_kernel, dilate_radius};
