//! Headless host.
//!
//! Drives an [`App`] through the same animation loop as the windowed runtime,
//! with a fixed-rate scheduler standing in for display refreshes and a
//! [`HeadlessTarget`] standing in for the surface.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::core::{attach, App};
use crate::frame::{AnimationLoop, FixedRateScheduler, FrameOutcome};
use crate::render::{Frame, HeadlessTarget};
use crate::viewport::{ViewportConfig, ViewportManager};

/// Headless run parameters.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub fps: f64,
    /// Stop after this many completed frames; `None` runs until the app
    /// exits or fails.
    pub max_frames: Option<u64>,
    pub viewport: ViewportConfig,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            max_frames: Some(120),
            viewport: ViewportConfig::default(),
        }
    }
}

/// Why a headless run ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HeadlessStop {
    FrameCap,
    Exit,
    Failure,
}

/// Summary of a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    /// Frames whose update and render both completed.
    pub frames: u64,
    pub presented: u64,
    pub wall_time: Duration,
    pub stop: HeadlessStop,
    pub last_frame: Option<Frame>,
}

/// Runs `app` without a window until the frame cap, an exit request or a
/// loop failure.
///
/// Loop failures are delivered to `App::on_error` and reported as
/// `HeadlessStop::Failure`; only setup problems return `Err`.
pub fn run_headless<A>(config: HeadlessConfig, app: A) -> Result<HeadlessReport>
where
    A: App + 'static,
{
    let scheduler = FixedRateScheduler::from_fps(config.fps).context("invalid headless frame rate")?;
    let mut anim = AnimationLoop::new(scheduler, ViewportManager::from_config(config.viewport));
    let mut target = HeadlessTarget::new();

    // Size the backing buffer before the app sees the viewport.
    let state = *anim.viewport().state();
    anim.viewport_mut()
        .on_resize(state.width(), state.height(), &mut target);

    let app = Rc::new(RefCell::new(app));
    attach(&app, &mut anim).context("failed to start headless animation loop")?;

    log::info!(
        "headless run at {} fps (frame cap: {:?})",
        config.fps,
        config.max_frames
    );

    let started = Instant::now();
    let mut frames = 0u64;
    let mut stop = HeadlessStop::FrameCap;

    while config.max_frames.is_none_or(|max| frames < max) {
        let Some(handle) = anim.scheduler_mut().wait_next() else {
            break;
        };

        match anim.fire(handle, &mut target) {
            FrameOutcome::Rendered => frames += 1,
            FrameOutcome::Exited => {
                frames += 1;
                stop = HeadlessStop::Exit;
                break;
            }
            FrameOutcome::Failed => {
                stop = HeadlessStop::Failure;
                break;
            }
            FrameOutcome::Ignored => {}
        }
    }

    anim.stop();

    let report = HeadlessReport {
        frames,
        presented: target.presented(),
        wall_time: started.elapsed(),
        stop,
        last_frame: target.last_frame().cloned(),
    };
    log::info!(
        "headless run finished: {} frames in {:.3}s ({:?})",
        report.frames,
        report.wall_time.as_secs_f64(),
        report.stop
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::core::AppControl;
    use crate::frame::LoopError;
    use crate::render::RenderCtx;
    use crate::time::FrameTime;
    use crate::viewport::ViewportState;

    #[derive(Default)]
    struct Probe {
        exit_on: Option<u64>,
        fail_on: Option<u64>,
        errors: Rc<Cell<u32>>,
        aspect: Rc<Cell<f64>>,
    }

    impl App for Probe {
        fn on_resize(&mut self, viewport: &ViewportState) {
            self.aspect.set(viewport.aspect());
        }

        fn update(&mut self, time: FrameTime) -> Result<AppControl> {
            if self.fail_on == Some(time.frame_index) {
                anyhow::bail!("probe failure");
            }
            if self.exit_on == Some(time.frame_index) {
                return Ok(AppControl::Exit);
            }
            Ok(AppControl::Continue)
        }

        fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<()> {
            ctx.target.present(&Frame::default())
        }

        fn on_error(&mut self, _err: LoopError) {
            self.errors.set(self.errors.get() + 1);
        }
    }

    fn fast(max_frames: Option<u64>) -> HeadlessConfig {
        HeadlessConfig {
            fps: 1000.0,
            max_frames,
            viewport: ViewportConfig {
                initial_width: 800,
                initial_height: 600,
                ..Default::default()
            },
        }
    }

    #[test]
    fn runs_until_frame_cap() {
        let aspect = Rc::new(Cell::new(0.0));
        let probe = Probe {
            aspect: Rc::clone(&aspect),
            ..Default::default()
        };
        let report = run_headless(fast(Some(5)), probe).unwrap();

        assert_eq!(report.frames, 5);
        assert_eq!(report.presented, 5);
        assert_eq!(report.stop, HeadlessStop::FrameCap);
        assert!((aspect.get() - 800.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn exit_request_ends_run() {
        let probe = Probe {
            exit_on: Some(2),
            ..Default::default()
        };
        let report = run_headless(fast(None), probe).unwrap();
        assert_eq!(report.frames, 3);
        assert_eq!(report.stop, HeadlessStop::Exit);
    }

    #[test]
    fn failure_reaches_app_once() {
        let errors = Rc::new(Cell::new(0));
        let probe = Probe {
            fail_on: Some(1),
            errors: Rc::clone(&errors),
            ..Default::default()
        };
        let report = run_headless(fast(Some(10)), probe).unwrap();

        assert_eq!(report.frames, 1);
        assert_eq!(report.presented, 1);
        assert_eq!(report.stop, HeadlessStop::Failure);
        assert_eq!(errors.get(), 1);
    }

    #[test]
    fn invalid_fps_is_a_setup_error() {
        let config = HeadlessConfig {
            fps: 0.0,
            ..fast(Some(1))
        };
        assert!(run_headless(config, Probe::default()).is_err());

        let config = HeadlessConfig {
            fps: 1e-20,
            ..fast(Some(1))
        };
        assert!(run_headless(config, Probe::default()).is_err());
    }
}
