/// Viewport size in logical pixels plus the effective pixel density.
///
/// Width and height are always at least 1, so `aspect()` is always finite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportState {
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) pixel_density: f64,
}

impl ViewportState {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel density after the cap was applied.
    #[inline]
    pub fn pixel_density(&self) -> f64 {
        self.pixel_density
    }

    /// `width / height`.
    #[inline]
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Size of the backing buffer in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| (f64::from(v) * self.pixel_density).round().max(1.0) as u32;
        (scale(self.width), scale(self.height))
    }
}
