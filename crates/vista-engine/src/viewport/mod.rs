//! Viewport bookkeeping.
//!
//! Canonical space:
//! - Logical pixels (DPI-independent), clamped to at least 1x1
//! - Backing buffer = logical size x capped pixel density
//!
//! Resize and density events are applied between frames on the loop thread,
//! so the render callback always sees a fully formed `ViewportState`.

mod error;
mod manager;
mod state;

pub use error::ViewportError;
pub use manager::{ViewportConfig, ViewportManager};
pub use state::ViewportState;
