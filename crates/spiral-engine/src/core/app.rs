use anyhow::Result;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    /// A frame was presented; keep going.
    Continue,
    /// Nothing was presented this time (surface not ready, nothing to draw).
    Skip,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once after the window and GPU context exist, before the first frame.
    ///
    /// An error here is fatal: the runtime shuts down and returns it.
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> Result<()>;

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called exactly once when the loop ends, while the GPU context is still alive.
    fn on_exit(&mut self) {}
}
