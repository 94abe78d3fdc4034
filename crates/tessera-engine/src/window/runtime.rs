use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::App;
use crate::device::GpuInit;
use crate::event::platform::{self, MouseTouch};
use crate::event::{LifecycleEvent, Modifiers, PaintEvent, Stage};
use crate::gl::WgpuGl;

use super::host::RuntimeHost;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tessera".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until its window closes.
    ///
    /// Platform callbacks are translated into `Event`s and delivered in
    /// arrival order. A fresh `WgpuGl` is offered through
    /// `Host::take_draw_context` each time the window becomes visible.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App<WgpuGl> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct RuntimeState<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    host: RuntimeHost,

    stage: Stage,
    modifiers: Modifiers,
    mouse: MouseTouch,
    exit_requested: bool,
}

impl<A> RuntimeState<A>
where
    A: App<WgpuGl> + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            host: RuntimeHost::default(),
            stage: Stage::Dead,
            modifiers: Modifiers::default(),
            mouse: MouseTouch::default(),
            exit_requested: false,
        }
    }

    /// Delivers queued events, including any the app queues while handling them.
    fn pump(&mut self) {
        while let Some(event) = self.host.queue.pop_front() {
            log::trace!("event: {event:?}");
            self.app.on_event(event, &mut self.host);
        }
    }

    fn set_stage(&mut self, to: Stage) {
        if self.stage == to {
            return;
        }
        log::info!("lifecycle: {} -> {}", self.stage, to);
        self.host.push(LifecycleEvent::new(self.stage, to));
        self.stage = to;
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        if let Some(w) = &self.host.window {
            return Ok(w.clone());
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        self.host.window = Some(window.clone());
        Ok(window)
    }

    fn become_visible(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = self.ensure_window(event_loop)?;
        let ctx = pollster::block_on(WgpuGl::new(window.clone(), self.gpu_init.clone()))
            .context("GPU initialization failed for window")?;
        self.host.pending_ctx = Some(ctx);

        self.set_stage(Stage::Alive);
        self.set_stage(Stage::Visible);
        if window.has_focus() {
            self.set_stage(Stage::Focused);
        }
        self.host
            .push(platform::size_event(window.inner_size(), window.scale_factor()));
        Ok(())
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App<WgpuGl> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.stage >= Stage::Visible {
            return;
        }

        if let Err(e) = self.become_visible(event_loop) {
            log::error!("failed to start: {e:#}");
            self.request_exit(event_loop);
            return;
        }
        self.pump();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.set_stage(Stage::Alive);
        self.pump();

        // Offered but never taken.
        self.host.pending_ctx = None;
        self.host.paint_requested = false;
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.host.window.clone() else { return };
        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.set_stage(Stage::Dead);
                self.pump();
                self.host.pending_ctx = None;
                self.request_exit(event_loop);
                return;
            }

            WindowEvent::Focused(true) if self.stage == Stage::Visible => {
                self.set_stage(Stage::Focused);
            }
            WindowEvent::Focused(false) if self.stage == Stage::Focused => {
                self.set_stage(Stage::Visible);
            }

            WindowEvent::Resized(size) => {
                self.host.push(platform::size_event(size, window.scale_factor()));
                window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.host.push(platform::size_event(window.inner_size(), scale_factor));
                window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let external = !self.host.take_paint_request();
                self.host.push(PaintEvent { external });
            }

            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = platform::map_modifiers(m.state());
            }
            WindowEvent::KeyboardInput {
                event,
                is_synthetic: false,
                ..
            } => {
                self.host.push(platform::key_event(&event, self.modifiers));
            }

            WindowEvent::Touch(touch) => {
                self.host.push(platform::touch_event(&touch));
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(t) = self.mouse.cursor_moved(position) {
                    self.host.push(t);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(t) = self.mouse.left_button(state) {
                    self.host.push(t);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(t) = self.mouse.cursor_left() {
                    self.host.push(t);
                }
            }

            _ => {}
        }

        self.pump();
    }
}
