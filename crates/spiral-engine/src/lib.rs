//! Spiral engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo binary:
//! window and event loop, device acquisition, shader building, spiral geometry
//! and the line-strip renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod paint;
pub mod shader;
pub mod geometry;
pub mod render;
