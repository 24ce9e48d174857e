use anyhow::Result;
use vista_engine::core::{App, AppControl};
use vista_engine::render::{ColorRgba, RenderCtx};
use vista_engine::scene::build_frame;
use vista_engine::time::FrameTime;
use vista_engine::viewport::ViewportState;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::scene::DemoScene;

/// Pixels of touchpad scroll that count as one wheel step.
const PIXELS_PER_WHEEL_STEP: f64 = 50.0;

/// Pointer drag tracking in physical pixels.
#[derive(Debug, Default)]
struct Drag {
    active: bool,
    last: Option<(f64, f64)>,
}

pub struct DemoApp {
    scene: DemoScene,
    clear: ColorRgba,
    drag: Drag,
    /// Surface height in physical pixels; drags are measured against it.
    drag_height: f32,
}

impl DemoApp {
    pub fn new(scene: DemoScene) -> Self {
        Self {
            scene,
            clear: ColorRgba::black(),
            drag: Drag::default(),
            drag_height: 1.0,
        }
    }

    fn on_cursor_moved(&mut self, x: f64, y: f64) {
        if self.drag.active {
            if let Some((lx, ly)) = self.drag.last {
                self.scene
                    .controls
                    .rotate((x - lx) as f32, (y - ly) as f32, self.drag_height);
            }
        }
        self.drag.last = Some((x, y));
    }
}

impl App for DemoApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                return AppControl::Exit;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.drag.active = *state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => self.on_cursor_moved(position.x, position.y),
            WindowEvent::CursorLeft { .. } => self.drag = Drag::default(),
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_WHEEL_STEP) as f32,
                };
                self.scene.controls.dolly(steps);
            }
            WindowEvent::Resized(size) => self.drag_height = size.height.max(1) as f32,
            _ => {}
        }
        AppControl::Continue
    }

    fn on_resize(&mut self, viewport: &ViewportState) {
        self.scene.camera.set_aspect(viewport.aspect() as f32);
        if self.drag_height <= 1.0 {
            self.drag_height = viewport.buffer_size().1 as f32;
        }
    }

    fn update(&mut self, time: FrameTime) -> Result<AppControl> {
        self.scene.animate(time.elapsed);
        Ok(AppControl::Continue)
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<()> {
        self.scene.controls.update(&mut self.scene.camera);

        let frame = build_frame(
            &self.scene.graph,
            &self.scene.camera,
            &self.scene.lighting,
            ctx.viewport,
            self.clear,
        );
        ctx.target.present(&frame)
    }
}
