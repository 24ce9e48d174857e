//! Frame scheduling and the animation loop.
//!
//! The loop is cooperatively scheduled: it asks a [`FrameScheduler`] for the
//! next display refresh, and the host calls [`AnimationLoop::fire`] with the
//! handle once that refresh arrives. One frame (update + render) always runs
//! to completion before the next one is requested.

mod animation;
mod error;
mod scheduler;

pub use animation::{AnimationLoop, FrameOutcome, LoopState};
pub use error::{FrameStage, LoopError};
pub use scheduler::{FixedRateScheduler, FrameHandle, FrameScheduler, ManualScheduler};
