use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::PerspectiveCamera;

/// Keeps the polar angle off the poles, where the orbit frame degenerates.
const POLE_EPS: f32 = 1e-4;

/// Camera orbit around a target point, driven by pointer drags and wheel steps.
///
/// Input only accumulates pending deltas; [`update`](Self::update) applies
/// them once per frame. With damping enabled each update applies
/// `damping_factor` of the pending rotation and keeps the rest, so motion
/// eases out over following frames.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, enabled: bool) -> Self {
        self.enable_damping = enabled;
        self
    }

    /// Queues a rotation for a pointer drag of `(dx, dy)` logical pixels.
    ///
    /// Dragging across the full viewport height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let per_px = TAU / viewport_height.max(1.0) * self.rotate_speed;
        self.pending_theta -= dx * per_px;
        self.pending_phi -= dy * per_px;
    }

    /// Queues a zoom. Positive steps move the camera towards the target.
    pub fn dolly(&mut self, steps: f32) {
        if !steps.is_finite() || steps == 0.0 {
            return;
        }
        let factor = 0.95f32.powf(self.zoom_speed * steps.abs());
        if steps > 0.0 {
            self.pending_scale *= factor;
        } else {
            self.pending_scale /= factor;
        }
    }

    /// Applies pending input to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let offset = camera.position - self.target;
        let radius = offset.length().max(f32::EPSILON);

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let k = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        theta += self.pending_theta * k;
        phi = (phi + self.pending_phi * k).clamp(POLE_EPS, PI - POLE_EPS);

        let radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        camera.position = self.target
            + Vec3::new(radius * sin_phi * sin_theta, radius * cos_phi, radius * sin_phi * cos_theta);
        camera.target = self.target;

        if self.enable_damping {
            self.pending_theta *= 1.0 - self.damping_factor;
            self.pending_phi *= 1.0 - self.damping_factor;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
        self.pending_scale = 1.0;

        camera.position.distance_squared(before) > 1e-10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.0)
            .with_position(Vec3::new(0.0, 0.0, 5.0))
            .looking_at(Vec3::ZERO)
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn idle_update_keeps_camera() {
        let mut cam = camera();
        let mut controls = OrbitControls::new();
        assert!(!controls.update(&mut cam));
        assert!(close(cam.position, Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn quarter_height_drag_turns_a_quarter() {
        let mut cam = camera();
        let mut controls = OrbitControls::new();
        controls.rotate(150.0, 0.0, 600.0);
        assert!(controls.update(&mut cam));
        assert!(close(cam.position, Vec3::new(-5.0, 0.0, 0.0)));
        // Nothing left pending without damping.
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn damping_eases_towards_full_rotation() {
        let mut cam = camera();
        let mut controls = OrbitControls::new().with_damping(true);
        controls.rotate(150.0, 0.0, 600.0);

        controls.update(&mut cam);
        let first_step = cam.position.x.atan2(cam.position.z).abs();
        assert!((first_step - 0.05 * PI / 2.0).abs() < 1e-4);

        for _ in 0..400 {
            controls.update(&mut cam);
        }
        assert!(close(cam.position, Vec3::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn dolly_scales_distance() {
        let mut cam = camera();
        let mut controls = OrbitControls::new();
        controls.dolly(1.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 4.75).abs() < 1e-4);

        controls.dolly(-1.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn distance_is_clamped() {
        let mut cam = camera();
        let mut controls = OrbitControls {
            min_distance: 4.0,
            ..OrbitControls::new()
        };
        controls.dolly(50.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_never_crosses_pole() {
        let mut cam = camera();
        let mut controls = OrbitControls::new();
        controls.rotate(0.0, 10_000.0, 600.0);
        controls.update(&mut cam);
        assert!(cam.position.is_finite());
        assert!(cam.position.y > 4.99);
        assert!(cam.view_projection().is_finite());
    }
}
