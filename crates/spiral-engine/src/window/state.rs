use crate::input::{Key, KeyEvent};

/// Per-window state mutated by the windowing system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowState {
    framebuffer_size: (u32, u32),
    close_requested: bool,
}

impl WindowState {
    pub fn new(framebuffer_size: (u32, u32)) -> Self {
        Self {
            framebuffer_size,
            close_requested: false,
        }
    }

    /// Drawable size in physical pixels as `(width, height)`.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer_size
    }

    pub fn set_framebuffer_size(&mut self, width: u32, height: u32) {
        self.framebuffer_size = (width, height);
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    pub fn set_should_close(&mut self, value: bool) {
        self.close_requested = value;
    }
}

/// Key handler that requests close on an Escape press and ignores everything else.
pub fn close_on_escape(window: &mut WindowState, event: &KeyEvent) {
    if event.is_press_of(Key::Escape) {
        log::debug!("escape pressed, closing window");
        window.set_should_close(true);
    }
}
