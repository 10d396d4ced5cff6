//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame and
//! `peek()` for the timing of a frame that may still be skipped.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameStats, FrameTime};
