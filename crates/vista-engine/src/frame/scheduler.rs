use std::time::{Duration, Instant};

use super::LoopError;

/// Opaque ticket for one scheduled frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameHandle(u64);

/// "Invoke me before the next display refresh", abstracted from the host.
///
/// A scheduler only records requests. The host observes them and calls
/// `AnimationLoop::fire` with the handle when the refresh happens.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, LoopError>;

    /// Cancels a pending request. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler whose pending request is polled by the host.
///
/// The windowed runtime turns a pending request into `Window::request_redraw`
/// and fires it on `RedrawRequested`; tests fire it directly.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
    closed: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Removes and returns the pending request, if any.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Marks the display as gone. Later requests fail with
    /// `SchedulingUnavailable`.
    pub fn close(&mut self) {
        self.closed = true;
        self.pending = None;
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, LoopError> {
        if self.closed {
            return Err(LoopError::scheduling("display surface closed"));
        }
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Deadline-based scheduler for hosts without a display (headless runs).
///
/// Deadlines advance by a fixed interval from the previous deadline. A
/// consumer that falls behind is not handed a burst of catch-up frames.
#[derive(Debug)]
pub struct FixedRateScheduler {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
    last_deadline: Option<Instant>,
}

impl FixedRateScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
            last_deadline: None,
        }
    }

    /// Interval for `fps` frames per second. Non-positive or non-finite
    /// rates are rejected.
    pub fn from_fps(fps: f64) -> Result<Self, LoopError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(LoopError::scheduling(format!("invalid frame rate {fps}")));
        }
        let interval = Duration::try_from_secs_f64(1.0 / fps)
            .map_err(|_| LoopError::scheduling(format!("frame rate {fps} is too low")))?;
        Ok(Self::new(interval))
    }

    /// Pending request and its deadline.
    pub fn next_due(&self) -> Option<(FrameHandle, Instant)> {
        self.pending
    }

    /// Returns the pending handle if its deadline has passed at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, deadline)) if deadline <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// Sleeps until the pending deadline and returns its handle.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub fn wait_next(&mut self) -> Option<FrameHandle> {
        let (_, deadline) = self.pending?;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        self.take_due(deadline)
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, LoopError> {
        let now = Instant::now();
        let deadline = match self.last_deadline {
            Some(prev) => (prev + self.interval).max(now),
            None => now,
        };
        self.last_deadline = Some(deadline);

        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some((handle, deadline));
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending, Some((h, _)) if h == handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_handles_are_unique() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame().unwrap();
        let b = s.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(s.pending(), Some(b));
    }

    #[test]
    fn manual_cancel_ignores_stale_handle() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame().unwrap();
        let b = s.request_frame().unwrap();
        s.cancel_frame(a);
        assert_eq!(s.pending(), Some(b));
        s.cancel_frame(b);
        assert_eq!(s.pending(), None);
    }

    #[test]
    fn closed_manual_scheduler_is_unavailable() {
        let mut s = ManualScheduler::new();
        s.close();
        assert!(matches!(
            s.request_frame(),
            Err(LoopError::SchedulingUnavailable { .. })
        ));
    }

    #[test]
    fn fixed_rate_rejects_bad_fps() {
        assert!(FixedRateScheduler::from_fps(0.0).is_err());
        assert!(FixedRateScheduler::from_fps(f64::NAN).is_err());
        assert!(FixedRateScheduler::from_fps(60.0).is_ok());
    }

    #[test]
    fn fixed_rate_rejects_unrepresentable_interval() {
        assert!(matches!(
            FixedRateScheduler::from_fps(1e-20),
            Err(LoopError::SchedulingUnavailable { .. })
        ));
        assert!(FixedRateScheduler::from_fps(f64::MIN_POSITIVE).is_err());
    }

    #[test]
    fn fixed_rate_deadlines_advance_by_interval() {
        let mut s = FixedRateScheduler::new(Duration::from_secs(10));
        let first = s.request_frame().unwrap();
        let (_, d0) = s.next_due().unwrap();
        assert_eq!(s.take_due(d0), Some(first));

        s.request_frame().unwrap();
        let (_, d1) = s.next_due().unwrap();
        assert_eq!(d1 - d0, Duration::from_secs(10));
        // Not due yet.
        assert_eq!(s.take_due(d0), None);
    }

    #[test]
    fn fixed_rate_cancel_clears_pending() {
        let mut s = FixedRateScheduler::new(Duration::from_millis(1));
        let h = s.request_frame().unwrap();
        s.cancel_frame(h);
        assert!(s.next_due().is_none());
        assert_eq!(s.wait_next(), None);
    }
}
