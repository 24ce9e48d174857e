use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{attach, App, AppControl};
use crate::device::GpuInit;
use crate::frame::{AnimationLoop, FrameOutcome, ManualScheduler};
use crate::render::SurfaceTarget;
use crate::viewport::{ViewportConfig, ViewportManager};

/// Settings for the single window opened by [`Runtime::run`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Cap for the backing-buffer pixel density.
    pub max_pixel_density: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "vista".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            max_pixel_density: 2.0,
        }
    }
}

/// Entry point for the windowed runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("cannot create the winit event loop")?;
        let mut state = RuntimeState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("event loop exited with an error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    anim: AnimationLoop<ManualScheduler>,

    window: Window,

    #[borrows(window)]
    #[covariant]
    target: SurfaceTarget<'this>,
}

struct RuntimeState<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: Rc<RefCell<A>>,
    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app: Rc::new(RefCell::new(app)),
            entry: None,
            fatal: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("window creation refused by the platform")?;

        let scale = window.scale_factor();
        let logical: LogicalSize<u32> = window.inner_size().to_logical(scale);
        let viewport = ViewportManager::from_config(ViewportConfig {
            initial_width: logical.width,
            initial_height: logical.height,
            max_pixel_density: self.config.max_pixel_density,
            device_pixel_density: scale,
        });

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            anim: AnimationLoop::new(ManualScheduler::new(), viewport),
            window,
            target_builder: |w| {
                pollster::block_on(SurfaceTarget::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    fn start_entry(&self, entry: &mut WindowEntry) -> Result<()> {
        entry.with_mut(|fields| {
            let state = *fields.anim.viewport().state();
            fields
                .anim
                .viewport_mut()
                .on_resize(state.width(), state.height(), fields.target);

            attach(&self.app, fields.anim).context("failed to start animation loop")
        })
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut entry) = self.entry.take() {
            entry.with_anim_mut(|anim| {
                anim.stop();
                anim.scheduler_mut().close();
            });
        }
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let created = self.create_window_entry(event_loop).and_then(|mut entry| {
            self.start_entry(&mut entry)?;
            Ok(entry)
        });

        match created {
            Ok(entry) => self.entry = Some(entry),
            Err(e) => {
                log::error!("failed to initialize window: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // A pending frame request is the only reason to redraw.
        if let Some(entry) = &self.entry {
            entry.with(|fields| {
                if fields.anim.scheduler().pending().is_some() {
                    fields.window.request_redraw();
                }
            });
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.app.borrow_mut().on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(size) => entry.with_mut(|fields| {
                let logical: LogicalSize<u32> = size.to_logical(fields.window.scale_factor());
                fields
                    .anim
                    .viewport_mut()
                    .on_resize(logical.width, logical.height, fields.target);
            }),

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => entry.with_mut(|fields| {
                fields
                    .anim
                    .viewport_mut()
                    .set_device_pixel_density(scale_factor, fields.target);
            }),

            WindowEvent::RedrawRequested => {
                let outcome = entry.with_mut(|fields| {
                    let handle = fields.anim.scheduler_mut().take_pending()?;
                    Some(fields.anim.fire(handle, fields.target))
                });

                match outcome {
                    Some(FrameOutcome::Exited) => self.shutdown(event_loop),
                    Some(FrameOutcome::Failed) => {
                        log::warn!("animation loop halted; keeping the last presented frame");
                    }
                    _ => {}
                }
            }

            _ => {}
        }
    }
}
