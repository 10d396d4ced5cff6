use anyhow::Result;

use crate::core::{App, AppControl};
use crate::input::KeyEvent;
use crate::time::{FrameClock, FrameTime};

use super::state::WindowState;

/// Key callback slot. A window holds at most one; registering replaces it.
pub type KeyHandler = Box<dyn FnMut(&mut WindowState, &KeyEvent)>;

/// Render loop state. `Closing` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopPhase {
    Running,
    Closing,
}

/// Loop state for one window, independent of winit and the GPU.
///
/// The runtime feeds it events and asks it whether to draw; the session owns
/// the application, the close flag and the key handler, and guarantees the
/// application's `on_exit` runs exactly once.
pub struct Session<A> {
    app: A,
    window: WindowState,
    key_handler: Option<KeyHandler>,
    clock: FrameClock,
    phase: LoopPhase,
    exited: bool,
}

impl<A: App> Session<A> {
    pub fn new(app: A, framebuffer_size: (u32, u32)) -> Self {
        Self {
            app,
            window: WindowState::new(framebuffer_size),
            key_handler: None,
            clock: FrameClock::new(),
            phase: LoopPhase::Running,
            exited: false,
        }
    }

    /// Installs the key handler, returning the one it replaced.
    pub fn set_key_callback(&mut self, handler: KeyHandler) -> Option<KeyHandler> {
        self.key_handler.replace(handler)
    }

    /// Delivers a key event to the registered handler, if any.
    pub fn dispatch_key(&mut self, event: KeyEvent) {
        if let Some(handler) = self.key_handler.as_mut() {
            handler(&mut self.window, &event);
        }
    }

    /// The OS asked to close the window (close button, window manager).
    pub fn request_close(&mut self) {
        self.window.set_should_close(true);
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        self.window.set_framebuffer_size(width, height);
    }

    /// Observes the close flag; once it has been seen set the session stays closing.
    pub fn phase(&mut self) -> LoopPhase {
        if self.phase == LoopPhase::Running && self.window.should_close() {
            log::debug!("close requested after {} frame(s)", self.clock.frames());
            self.phase = LoopPhase::Closing;
        }
        self.phase
    }

    /// Runs one-time application setup.
    pub fn start<F>(&mut self, setup: F) -> Result<()>
    where
        F: FnOnce(&mut A, &WindowState) -> Result<()>,
    {
        setup(&mut self.app, &self.window)
    }

    /// Drives one frame unless the session is closing.
    ///
    /// `draw` receives the application, the frame timing and the window
    /// state. The frame clock only advances when `draw` reports a presented
    /// frame. Returns the phase after the frame.
    pub fn frame<F>(&mut self, draw: F) -> LoopPhase
    where
        F: FnOnce(&mut A, FrameTime, &WindowState) -> AppControl,
    {
        if self.phase() == LoopPhase::Closing {
            return LoopPhase::Closing;
        }

        let time = self.clock.peek();
        match draw(&mut self.app, time, &self.window) {
            AppControl::Continue => {
                self.clock.tick();
            }
            AppControl::Skip => {}
            AppControl::Exit => self.window.set_should_close(true),
        }

        self.phase()
    }

    /// Ends the session. Calls `App::on_exit` on the first call only and
    /// returns whether it did.
    pub fn shutdown(&mut self) -> bool {
        self.window.set_should_close(true);
        self.phase();

        if self.exited {
            return false;
        }
        self.exited = true;

        let stats = self.clock.stats();
        log::info!(
            "shutting down after {} frame(s), {:.1} fps average",
            stats.frames,
            stats.average_fps()
        );

        self.app.on_exit();
        true
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn app(&self) -> &A {
        &self.app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FrameCtx, StartCtx};
    use crate::input::Key;
    use crate::window::close_on_escape;

    #[derive(Default)]
    struct CountingApp {
        started: bool,
        frames: u32,
        releases: u32,
        exit_after: Option<u32>,
        skip: bool,
    }

    impl App for CountingApp {
        fn on_start(&mut self, _ctx: &mut StartCtx<'_, '_>) -> Result<()> {
            Ok(())
        }

        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
            AppControl::Continue
        }

        fn on_exit(&mut self) {
            self.releases += 1;
        }
    }

    impl CountingApp {
        fn draw(&mut self) -> AppControl {
            self.frames += 1;
            match self.exit_after {
                Some(n) if self.frames >= n => AppControl::Exit,
                _ if self.skip => AppControl::Skip,
                _ => AppControl::Continue,
            }
        }
    }

    fn session() -> Session<CountingApp> {
        let mut s = Session::new(CountingApp::default(), (800, 600));
        s.set_key_callback(Box::new(close_on_escape));
        s.start(|app, _| {
            app.started = true;
            Ok(())
        })
        .unwrap();
        s
    }

    /// Mirrors the runtime: dispatch pending events, then draw, until closing.
    fn run(s: &mut Session<CountingApp>, mut events: Vec<KeyEvent>, max_iterations: u32) {
        events.reverse();
        for _ in 0..max_iterations {
            if let Some(ev) = events.pop() {
                s.dispatch_key(ev);
            }
            if s.frame(|app, _, _| app.draw()) == LoopPhase::Closing {
                break;
            }
        }
        s.shutdown();
    }

    #[test]
    fn escape_before_first_frame_draws_at_most_once_and_releases_once() {
        let mut s = session();
        run(&mut s, vec![KeyEvent::pressed(Key::Escape)], 100);

        assert!(s.app().started);
        assert!(s.app().frames <= 1);
        assert_eq!(s.app().releases, 1);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut s = session();
        assert!(s.shutdown());
        assert!(!s.shutdown());
        assert_eq!(s.app().releases, 1);
    }

    #[test]
    fn frames_run_until_escape() {
        let mut s = session();
        for _ in 0..3 {
            assert_eq!(s.frame(|app, _, _| app.draw()), LoopPhase::Running);
        }
        s.dispatch_key(KeyEvent::pressed(Key::Escape));
        assert_eq!(s.frame(|app, _, _| app.draw()), LoopPhase::Closing);
        assert_eq!(s.app().frames, 3);
        assert_eq!(s.frames(), 3);
    }

    #[test]
    fn skipped_frames_are_not_counted() {
        let mut s = Session::new(CountingApp { skip: true, ..Default::default() }, (1, 1));
        let mut indices = Vec::new();
        for _ in 0..3 {
            s.frame(|app, time, _| {
                indices.push(time.frame_index);
                app.draw()
            });
        }
        assert_eq!(s.app().frames, 3);
        assert_eq!(s.frames(), 0);
        assert_eq!(indices, vec![0, 0, 0]);
    }

    #[test]
    fn closing_is_terminal() {
        let mut s = session();
        s.request_close();
        assert_eq!(s.phase(), LoopPhase::Closing);

        s.resized(10, 10);
        assert_eq!(s.frame(|app, _, _| app.draw()), LoopPhase::Closing);
        assert_eq!(s.app().frames, 0);
    }

    #[test]
    fn other_keys_keep_running() {
        let mut s = session();
        run(
            &mut s,
            vec![
                KeyEvent::pressed(Key::Other(4)),
                KeyEvent::released(Key::Escape),
            ],
            5,
        );
        assert_eq!(s.app().frames, 5);
    }

    #[test]
    fn app_exit_requests_close() {
        let mut s = Session::new(CountingApp { exit_after: Some(2), ..Default::default() }, (1, 1));
        run(&mut s, Vec::new(), 100);
        assert_eq!(s.app().frames, 2);
        assert!(s.window().should_close());
    }

    #[test]
    fn without_handler_escape_is_ignored() {
        let mut s = Session::new(CountingApp::default(), (1, 1));
        s.dispatch_key(KeyEvent::pressed(Key::Escape));
        assert_eq!(s.phase(), LoopPhase::Running);
    }

    #[test]
    fn second_key_callback_replaces_first() {
        let mut s = Session::new(CountingApp::default(), (1, 1));
        assert!(s.set_key_callback(Box::new(close_on_escape)).is_none());

        let replaced = s.set_key_callback(Box::new(|_: &mut WindowState, _: &KeyEvent| {}));
        assert!(replaced.is_some());

        s.dispatch_key(KeyEvent::pressed(Key::Escape));
        assert!(!s.window().should_close());
    }

    #[test]
    fn handler_sees_window_state() {
        let mut s = Session::new(CountingApp::default(), (640, 480));
        s.set_key_callback(Box::new(|w: &mut WindowState, _: &KeyEvent| {
            if w.framebuffer_size() == (1024, 768) {
                w.set_should_close(true);
            }
        }));

        s.dispatch_key(KeyEvent::pressed(Key::Other(1)));
        assert!(!s.window().should_close());

        s.resized(1024, 768);
        s.dispatch_key(KeyEvent::pressed(Key::Other(1)));
        assert!(s.window().should_close());
    }

    #[test]
    fn start_errors_propagate() {
        let mut s = Session::new(CountingApp::default(), (1, 1));
        let err = s.start(|_, _| anyhow::bail!("no shader")).unwrap_err();
        assert_eq!(err.to_string(), "no shader");
    }
}
