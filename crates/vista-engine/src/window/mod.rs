//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the window, and turns the animation loop's
//! frame requests into redraw requests.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
