//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines); geometry buffers are owned
//! by the application and passed in at draw time.
//!
//! Convention: vertex positions are already in clip space (x, y in [-1, 1]).

mod ctx;
mod geometry;
mod params;
mod spiral;

pub use ctx::{RenderCtx, RenderTarget};
pub use geometry::GeometryBuffer;
pub use params::DrawParams;
pub use spiral::SpiralRenderer;
