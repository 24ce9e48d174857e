use anyhow::Result;
use winit::event::WindowEvent;

use crate::frame::LoopError;
use crate::render::RenderCtx;
use crate::time::FrameTime;
use crate::viewport::ViewportState;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// All callbacks run on the loop thread, never concurrently with each other.
pub trait App {
    /// Called for window events (windowed runtime only).
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called after the viewport changed, before the next frame renders.
    fn on_resize(&mut self, viewport: &ViewportState) {
        let _ = viewport;
    }

    /// Advances animated state. Returning an error stops the loop.
    fn update(&mut self, time: FrameTime) -> Result<AppControl>;

    /// Presents the current state through `ctx.target`.
    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<()>;

    /// Receives the error that stopped the loop. No automatic restart follows.
    fn on_error(&mut self, err: LoopError) {
        log::error!("animation loop stopped: {:#}", anyhow::Error::from(err));
    }
}
