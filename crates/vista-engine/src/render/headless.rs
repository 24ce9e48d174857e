use super::{Frame, RenderTarget};

/// Render target without a display.
///
/// Records the backing-buffer size and the most recent frame. Used by the
/// headless driver and by tests.
#[derive(Debug, Default)]
pub struct HeadlessTarget {
    size: Option<(u32, u32)>,
    presented: u64,
    last: Option<Frame>,
}

impl HeadlessTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing-buffer size from the last `resize`, if any.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }
}

impl RenderTarget for HeadlessTarget {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    fn present(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self.presented += 1;
        self.last = Some(frame.clone());
        log::trace!(
            "headless present #{} ({} markers)",
            self.presented,
            frame.markers.len()
        );
        Ok(())
    }
}
