//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform` translates winit keyboard events into [`KeyEvent`]s.

pub(crate) mod platform;
mod types;

pub use types::{Key, KeyEvent, KeyState};
