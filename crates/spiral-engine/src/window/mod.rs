//! Window + runtime loop.
//!
//! `Runtime` owns the winit EventLoop, the Window and the GPU context.
//! `Session` holds everything the loop decides on (close flag, key handler,
//! frame accounting, app lifecycle) and is usable without a window.

mod runtime;
mod session;
mod state;

pub use runtime::{Runtime, RuntimeConfig};
pub use session::{KeyHandler, LoopPhase, Session};
pub use state::{close_on_escape, WindowState};
