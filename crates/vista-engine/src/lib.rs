//! Vista engine crate.
//!
//! Owns the animation loop, viewport bookkeeping and the platform + GPU
//! runtime pieces that drive it. Scene content is supplied by higher layers.

pub mod core;
pub mod device;
pub mod frame;
pub mod headless;
pub mod logging;
pub mod render;
pub mod scene;
pub mod time;
pub mod viewport;
pub mod window;
