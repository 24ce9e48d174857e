use crate::time::FrameTime;
use crate::viewport::ViewportState;

use super::RenderTarget;

/// Per-frame context passed to the render callback.
///
/// `viewport` already reflects every resize applied before this frame.
pub struct RenderCtx<'a> {
    pub time: FrameTime,
    pub viewport: &'a ViewportState,
    pub target: &'a mut dyn RenderTarget,
}
