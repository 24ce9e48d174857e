//! Presentation subsystem.
//!
//! The animation loop talks to an opaque [`RenderTarget`]: it resizes the
//! backing buffer and presents [`Frame`] snapshots. What a target does with a
//! frame is its own business.
//!
//! Convention:
//! - marker centres are in NDC (+Y up), depth in `[0, 1]`
//! - marker radii are in backing-buffer pixels
//! - marker highlights are in radius units, +Y up

mod color;
mod ctx;
mod headless;
mod markers;
mod surface;

pub use color::ColorRgba;
pub use ctx::RenderCtx;
pub use headless::HeadlessTarget;
pub use surface::SurfaceTarget;

use glam::Vec2;

/// Output surface driven by the animation loop.
pub trait RenderTarget {
    /// Resizes the backing buffer, in device pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Presents a complete frame.
    ///
    /// An `Err` is a render failure; the previously presented frame stays on
    /// screen.
    fn present(&mut self, frame: &Frame) -> anyhow::Result<()>;
}

/// One projected scene object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Marker {
    pub center: Vec2,
    pub depth: f32,
    pub radius_px: f32,
    pub color: ColorRgba,
    /// Where the object's reference axis points on the disc, in radius units
    /// (length at most 1). Follows the object's orientation.
    pub highlight: Vec2,
}

/// Scene snapshot handed to [`RenderTarget::present`].
///
/// Markers are ordered back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub clear: ColorRgba,
    pub markers: Vec<Marker>,
}
