use crate::render::RenderTarget;

use super::error::validate_dimensions;
use super::ViewportState;

/// Initial viewport parameters.
#[derive(Debug, Clone)]
pub struct ViewportConfig {
    pub initial_width: u32,
    pub initial_height: u32,

    /// Upper bound for the pixel density used for the backing buffer.
    ///
    /// High-DPI displays beyond this are rendered at the cap and upscaled.
    pub max_pixel_density: f64,

    /// Density reported by the display at startup.
    pub device_pixel_density: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            initial_width: 1280,
            initial_height: 720,
            max_pixel_density: 2.0,
            device_pixel_density: 1.0,
        }
    }
}

type ResizeListener = Box<dyn FnMut(&ViewportState)>;

/// Tracks the output surface size and notifies dependents on change.
///
/// On every resize the render target's backing buffer is resized first, then
/// each projection listener (typically a camera) is notified in
/// subscription order.
pub struct ViewportManager {
    state: ViewportState,
    max_pixel_density: f64,
    device_pixel_density: f64,
    listeners: Vec<ResizeListener>,
}

impl ViewportManager {
    /// Creates a manager for a `width`x`height` surface on a 1.0-density display.
    pub fn initialize(width: u32, height: u32, max_pixel_density: f64) -> Self {
        Self::from_config(ViewportConfig {
            initial_width: width,
            initial_height: height,
            max_pixel_density,
            device_pixel_density: 1.0,
        })
    }

    pub fn from_config(config: ViewportConfig) -> Self {
        let max_pixel_density = sanitize_density(config.max_pixel_density);
        let device_pixel_density = sanitize_density(config.device_pixel_density);
        let (width, height) = clamp_dimensions(config.initial_width, config.initial_height);

        Self {
            state: ViewportState {
                width,
                height,
                pixel_density: device_pixel_density.min(max_pixel_density),
            },
            max_pixel_density,
            device_pixel_density,
            listeners: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Registers a projection listener, called after every applied change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ViewportState) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Applies a new logical surface size.
    ///
    /// Zero-sized sides are clamped to 1 and reported at `warn`.
    pub fn on_resize(
        &mut self,
        width: u32,
        height: u32,
        target: &mut dyn RenderTarget,
    ) -> &ViewportState {
        let (width, height) = clamp_dimensions(width, height);
        self.state.width = width;
        self.state.height = height;
        self.apply(target)
    }

    /// Applies a new device pixel density (e.g. the window moved to another
    /// monitor). The effective density stays capped.
    pub fn set_device_pixel_density(
        &mut self,
        density: f64,
        target: &mut dyn RenderTarget,
    ) -> &ViewportState {
        self.device_pixel_density = sanitize_density(density);
        self.apply(target)
    }

    fn apply(&mut self, target: &mut dyn RenderTarget) -> &ViewportState {
        self.state.pixel_density = self.device_pixel_density.min(self.max_pixel_density);

        let (bw, bh) = self.state.buffer_size();
        target.resize(bw, bh);

        for listener in &mut self.listeners {
            listener(&self.state);
        }

        log::debug!(
            "viewport {}x{} @ {:.2}x (buffer {bw}x{bh}, aspect {:.4})",
            self.state.width,
            self.state.height,
            self.state.pixel_density,
            self.state.aspect(),
        );

        &self.state
    }
}

fn clamp_dimensions(width: u32, height: u32) -> (u32, u32) {
    validate_dimensions(width, height).unwrap_or_else(|err| {
        log::warn!("{err}");
        err.clamped()
    })
}

fn sanitize_density(density: f64) -> f64 {
    if density.is_finite() && density > 0.0 {
        density
    } else {
        1.0
    }
}
