use std::fmt;

/// Callback that was running when a frame failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStage {
    Update,
    Render,
}

impl fmt::Display for FrameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => f.write_str("update"),
            Self::Render => f.write_str("render"),
        }
    }
}

/// Errors that stop (or prevent) the animation loop.
#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    /// The host cannot deliver display refreshes (e.g. no surface).
    #[error("frame scheduling unavailable: {reason}")]
    SchedulingUnavailable { reason: String },

    /// An update or render callback returned an error.
    #[error("{stage} callback failed on frame {frame}")]
    FrameCallback {
        stage: FrameStage,
        frame: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl LoopError {
    pub(crate) fn scheduling(reason: impl Into<String>) -> Self {
        Self::SchedulingUnavailable {
            reason: reason.into(),
        }
    }

    pub(crate) fn callback(stage: FrameStage, frame: u64, source: anyhow::Error) -> Self {
        Self::FrameCallback {
            stage,
            frame,
            source: source.into(),
        }
    }
}
