use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{GlContext, GlInit};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gl: GlInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            initial_size: LogicalSize::new(1280.0, 960.0),
            gl: GlInit::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until its window closes or a callback requests exit.
    ///
    /// Window and GL context are created inside the loop (on `resumed`, as
    /// winit requires); `App::on_ready` runs right after, and a failure
    /// there is returned from this function.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState {
            config,
            app,
            entry: None,
            exit_requested: false,
            startup_error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(err) = state.startup_error.take() {
            return Err(err);
        }
        Ok(())
    }
}

/// The single window plus its GL context and clock.
struct WindowEntry {
    window: Window,
    gl: GlContext,
    clock: FrameClock,
}

struct RuntimeState<A: App + 'static> {
    config: RuntimeConfig,
    app: A,
    entry: Option<WindowEntry>,
    exit_requested: bool,
    /// Startup failure carried out of the event loop to `Runtime::run`.
    startup_error: Option<anyhow::Error>,
}

impl<A: App> RuntimeState<A> {
    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let (window, gl) = GlContext::create(event_loop, attrs, &self.config.gl)?;
        self.app
            .on_ready(&gl)
            .context("application startup failed")?;

        window.request_redraw();
        self.entry = Some(WindowEntry {
            window,
            gl,
            clock: FrameClock::new(),
        });
        Ok(())
    }
}

impl<A: App> ApplicationHandler for RuntimeState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }
        if let Err(err) = self.create_entry(event_loop) {
            log::error!("failed to start: {err:#}");
            self.startup_error = Some(err);
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw; under vsync the swap paces the loop.
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                entry.gl.resize(new_size);
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let time = entry.clock.tick();
                let control = {
                    let mut ctx = FrameCtx {
                        window: &entry.window,
                        gl: &entry.gl,
                        time,
                    };
                    self.app.on_frame(&mut ctx)
                };

                entry.window.pre_present_notify();
                if let Err(err) = entry.gl.swap_buffers() {
                    log::error!("present failed: {err:#}");
                    self.request_exit(event_loop);
                    return;
                }

                if control == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
