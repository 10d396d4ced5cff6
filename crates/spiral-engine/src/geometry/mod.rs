//! CPU-side geometry.
//!
//! Vertices are generated here and uploaded by `render::geometry`. Nothing in
//! this module touches the GPU, so it is fully testable headless.

mod spiral;
mod vertex;

pub use spiral::{build_spiral, SpiralParams, PI_APPROX, SPIRAL_SEGMENTS};
pub use vertex::{Vertex, FLOATS_PER_VERTEX};
