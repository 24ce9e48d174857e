use std::time::Duration;

use super::TimeSource;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the loop started. Never decreases.
    pub elapsed: f64,

    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Clock producing `FrameTime` snapshots relative to a fixed start.
///
/// The start timestamp is captured on construction and never reset; a stopped
/// and restarted loop builds a fresh clock.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// hand a huge step to downstream systems. Elapsed time is not clamped.
#[derive(Debug, Clone)]
pub struct ElapsedClock<T> {
    source: T,
    start: Duration,
    last: Duration,
    frame_index: u64,
    dt_max: Duration,
}

impl<T: TimeSource> ElapsedClock<T> {
    pub fn new(source: T) -> Self {
        Self::with_dt_max(source, Duration::from_millis(250))
    }

    pub fn with_dt_max(source: T, dt_max: Duration) -> Self {
        let start = source.now();
        Self {
            source,
            start,
            last: start,
            frame_index: 0,
            dt_max,
        }
    }

    /// Seconds since start as of the last tick.
    pub fn elapsed(&self) -> f64 {
        (self.last - self.start).as_secs_f64()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        // A source that steps backwards must not make elapsed time decrease.
        let now = self.source.now().max(self.last);
        let dt = (now - self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime {
            elapsed: (now - self.start).as_secs_f64(),
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualTime;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn elapsed_is_relative_to_construction() {
        let time = ManualTime::new();
        time.advance(ms(5_000));
        let mut clock = ElapsedClock::new(time.clone());

        time.advance(ms(500));
        let ft = clock.tick();
        assert!((ft.elapsed - 0.5).abs() < 1e-9);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn frame_index_counts_ticks() {
        let time = ManualTime::new();
        let mut clock = ElapsedClock::new(time.clone());
        for expected in 0..4 {
            time.advance(ms(16));
            assert_eq!(clock.tick().frame_index, expected);
        }
    }

    #[test]
    fn backwards_source_does_not_decrease_elapsed() {
        let time = ManualTime::new();
        let mut clock = ElapsedClock::new(time.clone());

        time.set(ms(100));
        let a = clock.tick();
        time.set(ms(40));
        let b = clock.tick();

        assert!(b.elapsed >= a.elapsed);
        assert_eq!(b.dt, 0.0);
    }

    #[test]
    fn dt_is_clamped_but_elapsed_is_not() {
        let time = ManualTime::new();
        let mut clock = ElapsedClock::with_dt_max(time.clone(), ms(100));

        time.advance(ms(3_000));
        let ft = clock.tick();
        assert!((ft.dt - 0.1).abs() < 1e-6);
        assert!((ft.elapsed - 3.0).abs() < 1e-9);
        assert!((clock.elapsed() - 3.0).abs() < 1e-9);
    }
}
