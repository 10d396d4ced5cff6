use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, FrameCtx, StartCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{platform, KeyEvent};

use super::session::{KeyHandler, LoopPhase, Session};
use super::state::WindowState;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "spiral".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Opens one window, creates its GPU context, and drives an [`App`] until the
/// window's close flag is set.
///
/// ```rust,ignore
/// Runtime::new(RuntimeConfig::default())
///     .on_key(close_on_escape)
///     .run(MyApp::default())?;
/// ```
pub struct Runtime {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    key_handler: Option<KeyHandler>,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            gpu_init: GpuInit::default(),
            key_handler: None,
        }
    }

    pub fn gpu(mut self, init: GpuInit) -> Self {
        self.gpu_init = init;
        self
    }

    /// Registers the window's key handler. A later call replaces an earlier one.
    pub fn on_key<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut WindowState, &KeyEvent) + 'static,
    {
        self.key_handler = Some(Box::new(handler));
        self
    }

    /// Runs the event loop to completion.
    ///
    /// Returns an error if the window, the GPU context or `App::on_start`
    /// could not be set up.
    pub fn run<A>(self, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let initial = self.config.initial_size;
        let mut session = Session::new(app, (initial.width as u32, initial.height as u32));
        if let Some(handler) = self.key_handler {
            session.set_key_callback(handler);
        }

        let mut state = AppState {
            config: self.config,
            gpu_init: self.gpu_init,
            session,
            entry: None,
            fatal: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    session: Session<A>,
    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w: &Window| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let size = entry.with_gpu(|gpu| {
            log::info!("renderer: {}", gpu.adapter_summary());
            log::info!("surface format: {:?}", gpu.surface_format());
            gpu.size()
        });
        log::info!("framebuffer size: {}x{}", size.width, size.height);
        self.session.resized(size.width, size.height);

        let session = &mut self.session;
        entry
            .with_gpu(|gpu| {
                session.start(|app, window| app.on_start(&mut StartCtx { gpu, window }))
            })
            .context("application setup failed")?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(entry) = self.entry.as_mut() {
            entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            entry.with_window(|w| w.request_redraw());
        }
        self.session.resized(new_size.width, new_size.height);
    }

    fn redraw(&mut self) {
        let session = &mut self.session;
        let Some(entry) = self.entry.as_mut() else { return };

        session.frame(|app, time, state| {
            entry.with_mut(|fields| {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        window: fields.window,
                        state,
                    },
                    gpu: fields.gpu,
                    time,
                };
                app.on_frame(&mut ctx)
            })
        });
    }

    /// Releases application resources, then the GPU context and the window.
    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        self.session.shutdown();
        self.entry = None;
        event_loop.exit();
    }

    /// Stores `err` for `Runtime::run` to return; the caller reports it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.fatal = Some(err);
        self.teardown(event_loop);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.fatal.is_some() {
            return;
        }

        if let Err(err) = self.open(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.phase() == LoopPhase::Closing {
            self.teardown(event_loop);
            return;
        }

        // Continuous redraw, paced by the present mode.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.session.dispatch_key(platform::translate_key_event(&event));
            }

            WindowEvent::CloseRequested => self.session.request_close(),

            WindowEvent::Resized(new_size) => self.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size()));
                if let Some(new_size) = new_size {
                    self.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        if self.session.phase() == LoopPhase::Closing {
            self.teardown(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Reached when the platform ends the loop on its own.
        self.session.shutdown();
        self.entry = None;
    }
}
