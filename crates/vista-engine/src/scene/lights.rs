use glam::Vec3;

use crate::render::ColorRgba;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: ColorRgba,
    pub intensity: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub color: ColorRgba,
    pub intensity: f32,
    pub position: Vec3,
}

/// Light parameters of a scene. Intensities are plain configuration values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub point: PointLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: ColorRgba::white(),
                intensity: 1.0,
            },
            point: PointLight {
                color: ColorRgba::white(),
                intensity: 1.0,
                position: Vec3::ZERO,
            },
        }
    }
}

impl Lighting {
    /// Point-light contribution at `position`: `intensity / (1 + d²)`.
    fn point_falloff(&self, position: Vec3) -> f32 {
        let d2 = position.distance_squared(self.point.position);
        self.point.intensity.max(0.0) / (1.0 + d2)
    }

    /// Tints `base` by both lights at `position`. Alpha is kept.
    pub fn illuminate(&self, base: ColorRgba, position: Vec3) -> ColorRgba {
        let ambient = self.ambient.color.scaled(self.ambient.intensity.max(0.0));
        let point = self.point.color.scaled(self.point_falloff(position));
        let light = ColorRgba::new(
            (ambient.r + point.r).min(1.0),
            (ambient.g + point.g).min(1.0),
            (ambient.b + point.b).min(1.0),
            1.0,
        );
        base.modulate(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim() -> Lighting {
        let mut l = Lighting::default();
        l.ambient.intensity = 0.2;
        l.point.intensity = 0.6;
        l
    }

    #[test]
    fn point_light_falls_off_with_distance() {
        let l = dim();
        let near = l.illuminate(ColorRgba::white(), Vec3::ZERO);
        let far = l.illuminate(ColorRgba::white(), Vec3::new(3.0, 0.0, 0.0));
        assert!((near.r - 0.8).abs() < 1e-6);
        assert!((far.g - (0.2 + 0.6 / 10.0)).abs() < 1e-6);
    }

    #[test]
    fn light_level_is_clamped() {
        let full = Lighting::default().illuminate(ColorRgba::white(), Vec3::ZERO);
        assert_eq!(full, ColorRgba::white());

        let mut l = dim();
        l.ambient.intensity = -5.0;
        l.point.intensity = 0.0;
        assert_eq!(l.illuminate(ColorRgba::white(), Vec3::ZERO), ColorRgba::black());
    }

    #[test]
    fn illuminate_tints_base_color() {
        let mut l = dim();
        l.point.intensity = 0.0;
        l.ambient.color = ColorRgba::new(1.0, 0.5, 0.0, 1.0);
        let c = l.illuminate(ColorRgba::new(1.0, 1.0, 1.0, 0.5), Vec3::ZERO);
        assert!((c.r - 0.2).abs() < 1e-6);
        assert!((c.g - 0.1).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 0.5);
    }
}
