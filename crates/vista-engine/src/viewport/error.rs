/// Viewport input that had to be corrected.
///
/// Never fatal: the manager clamps and carries on, logging the error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewportError {
    #[error("invalid viewport dimensions {width}x{height}; clamping each side to at least 1")]
    InvalidDimensions { width: u32, height: u32 },
}

impl ViewportError {
    /// Dimensions after the recovery clamp.
    pub fn clamped(self) -> (u32, u32) {
        match self {
            Self::InvalidDimensions { width, height } => (width.max(1), height.max(1)),
        }
    }
}

/// Checks that both sides are positive.
pub(super) fn validate_dimensions(width: u32, height: u32) -> Result<(u32, u32), ViewportError> {
    if width == 0 || height == 0 {
        return Err(ViewportError::InvalidDimensions { width, height });
    }
    Ok((width, height))
}
