//! Time subsystem.
//!
//! Provides monotonic, testable frame timing without coupling to the runtime.
//! - one `ElapsedClock` per animation loop run, created on `start`
//! - call `tick()` once per frame to obtain `FrameTime`
//! - inject `ManualTime` in tests to control the clock precisely

mod clock;
mod source;

pub use clock::{ElapsedClock, FrameTime};
pub use source::{ManualTime, MonotonicTime, TimeSource};
