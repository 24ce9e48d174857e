//! Core engine-facing contracts.
//!
//! Defines the interface between hosts (windowed runtime, headless driver)
//! and application code, and the glue that plugs an [`App`] into an
//! animation loop.

mod app;
mod attach;

pub use app::{App, AppControl};
pub use attach::attach;
