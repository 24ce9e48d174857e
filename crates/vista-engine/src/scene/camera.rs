use glam::{Mat4, Vec3};

/// Right-handed perspective camera looking from `position` at `target`.
///
/// Projection maps depth to `[0, 1]` (wgpu convention).
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    aspect: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            near: 0.1,
            far: 2000.0,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            aspect: 1.0,
        };
        camera.set_aspect(aspect);
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the projection aspect. Non-finite or non-positive values are
    /// ignored and reported as `false`.
    pub fn set_aspect(&mut self, aspect: f32) -> bool {
        if !(aspect.is_finite() && aspect > 0.0) {
            log::warn!("ignoring camera aspect {aspect}");
            return false;
        }
        self.aspect = aspect;
        true
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        let forward = self.target - self.position;
        if forward.length_squared() <= f32::EPSILON {
            return Mat4::from_translation(-self.position);
        }
        // Looking straight up or down makes Y a degenerate up vector.
        let up = if forward.normalize().cross(Vec3::Y).length_squared() <= 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Distance to the image plane, in pixels, for a viewport `height` px tall.
    pub fn focal_length_px(&self, height: f32) -> f32 {
        0.5 * height / (0.5 * self.fov_y_degrees.to_radians()).tan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_scales_horizontal_focal() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0);
        assert!(cam.set_aspect(2.0));
        let p = cam.projection();
        assert!((p.x_axis.x * 2.0 - p.y_axis.y).abs() < 1e-5);
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = PerspectiveCamera::new(75.0, 1.5);
        assert!(!cam.set_aspect(0.0));
        assert!(!cam.set_aspect(f32::INFINITY));
        assert_eq!(cam.aspect(), 1.5);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let cam = PerspectiveCamera::new(75.0, 4.0 / 3.0)
            .with_position(Vec3::new(0.0, 0.0, 5.0))
            .looking_at(Vec3::ZERO);
        let ndc = cam.view_projection().project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn vertical_view_stays_finite() {
        let cam = PerspectiveCamera::new(60.0, 1.0)
            .with_position(Vec3::new(0.0, 10.0, 0.0))
            .looking_at(Vec3::ZERO);
        assert!(cam.view_projection().is_finite());
    }
}
