use anyhow::Result;

use crate::core::AppControl;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::{ElapsedClock, FrameTime, MonotonicTime, TimeSource};
use crate::viewport::ViewportManager;

use super::{FrameHandle, FrameScheduler, FrameStage, LoopError};

type UpdateFn = Box<dyn FnMut(FrameTime) -> Result<AppControl>>;
type RenderFn = Box<dyn FnMut(&mut RenderCtx<'_>) -> Result<()>>;
type ErrorHandler = Box<dyn FnMut(LoopError)>;

/// Externally visible loop state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// What happened when the host fired a frame handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Frame completed and the next one is scheduled.
    Rendered,
    /// Frame completed, update asked to exit; the loop is stopped.
    Exited,
    /// A callback or the scheduler failed; the loop is stopped and the error
    /// went to the error handler.
    Failed,
    /// Stale handle or stopped loop; no callback ran.
    Ignored,
}

struct Running<T> {
    clock: ElapsedClock<T>,
    pending: Option<FrameHandle>,
    update: UpdateFn,
    render: RenderFn,
}

enum Phase<T> {
    Stopped,
    Running(Running<T>),
}

/// Drives the update → render → schedule cycle.
///
/// The loop owns the [`ViewportManager`]; resize events go through
/// [`viewport_mut`](Self::viewport_mut) between frames, so every render
/// callback sees the latest viewport.
pub struct AnimationLoop<S, T = MonotonicTime> {
    scheduler: S,
    time: T,
    viewport: ViewportManager,
    phase: Phase<T>,
    on_error: Option<ErrorHandler>,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    /// Creates a stopped loop timed by the wall clock.
    pub fn new(scheduler: S, viewport: ViewportManager) -> Self {
        Self::with_time_source(scheduler, viewport, MonotonicTime::new())
    }
}

impl<S, T> AnimationLoop<S, T>
where
    S: FrameScheduler,
    T: TimeSource + Clone,
{
    pub fn with_time_source(scheduler: S, viewport: ViewportManager, time: T) -> Self {
        Self {
            scheduler,
            time,
            viewport,
            phase: Phase::Stopped,
            on_error: None,
        }
    }

    pub fn state(&self) -> LoopState {
        match self.phase {
            Phase::Stopped => LoopState::Stopped,
            Phase::Running(_) => LoopState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    pub fn viewport(&self) -> &ViewportManager {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportManager {
        &mut self.viewport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Registers the handler that receives errors stopping a running loop.
    ///
    /// Without a handler such errors are logged at `error`.
    pub fn on_error<F>(&mut self, handler: F)
    where
        F: FnMut(LoopError) + 'static,
    {
        self.on_error = Some(Box::new(handler));
    }

    /// Starts the loop and requests the first frame.
    ///
    /// Calling `start` on a running loop replaces the callbacks and continues:
    /// the clock and the already pending frame are kept, and the next fired
    /// frame uses the new callbacks.
    ///
    /// Fails with [`LoopError::SchedulingUnavailable`] when the scheduler cannot
    /// deliver frames; the loop then stays stopped.
    pub fn start<U, R>(&mut self, update: U, render: R) -> Result<(), LoopError>
    where
        U: FnMut(FrameTime) -> Result<AppControl> + 'static,
        R: FnMut(&mut RenderCtx<'_>) -> Result<()> + 'static,
    {
        if let Phase::Running(running) = &mut self.phase {
            log::debug!("animation loop already running; replacing callbacks");
            running.update = Box::new(update);
            running.render = Box::new(render);
            return Ok(());
        }

        let handle = self.scheduler.request_frame()?;
        self.phase = Phase::Running(Running {
            clock: ElapsedClock::new(self.time.clone()),
            pending: Some(handle),
            update: Box::new(update),
            render: Box::new(render),
        });

        log::debug!("animation loop started");
        Ok(())
    }

    /// Stops the loop and cancels the pending frame.
    ///
    /// No callback runs afterwards until the next `start`. Stopping a stopped
    /// loop does nothing.
    pub fn stop(&mut self) {
        let Phase::Running(running) = std::mem::replace(&mut self.phase, Phase::Stopped) else {
            return;
        };
        if let Some(handle) = running.pending {
            self.scheduler.cancel_frame(handle);
        }
        log::debug!("animation loop stopped");
    }

    /// Runs one frame for `handle`, presenting through `target`.
    ///
    /// Called by the host when the scheduler's refresh arrives. Handles that
    /// are not the currently pending one are ignored.
    pub fn fire(&mut self, handle: FrameHandle, target: &mut dyn RenderTarget) -> FrameOutcome {
        let Phase::Running(running) = &mut self.phase else {
            log::trace!("{handle:?} fired while stopped; ignored");
            return FrameOutcome::Ignored;
        };
        if running.pending != Some(handle) {
            log::trace!("stale {handle:?} ignored");
            return FrameOutcome::Ignored;
        }
        running.pending = None;

        let time = running.clock.tick();
        log::trace!("frame {} at {:.4}s", time.frame_index, time.elapsed);

        let control = match (running.update)(time) {
            Ok(control) => control,
            Err(e) => {
                return self.fail(LoopError::callback(FrameStage::Update, time.frame_index, e));
            }
        };

        let mut ctx = RenderCtx {
            time,
            viewport: self.viewport.state(),
            target,
        };
        if let Err(e) = (running.render)(&mut ctx) {
            return self.fail(LoopError::callback(FrameStage::Render, time.frame_index, e));
        }

        if control == AppControl::Exit {
            log::debug!("exit requested on frame {}", time.frame_index);
            self.phase = Phase::Stopped;
            return FrameOutcome::Exited;
        }

        match self.scheduler.request_frame() {
            Ok(next) => {
                running.pending = Some(next);
                FrameOutcome::Rendered
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, err: LoopError) -> FrameOutcome {
        self.phase = Phase::Stopped;

        match self.on_error.as_mut() {
            Some(handler) => handler(err),
            None => match std::error::Error::source(&err) {
                Some(cause) => log::error!("animation loop stopped: {err}: {cause}"),
                None => log::error!("animation loop stopped: {err}"),
            },
        }

        FrameOutcome::Failed
    }
}
