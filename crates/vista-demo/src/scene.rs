use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use vista_engine::render::ColorRgba;
use vista_engine::scene::{
    AmbientLight, Lighting, Node, NodeId, OrbitControls, PerspectiveCamera, PointLight, SceneGraph,
};

/// Spin rates in radians per second, about X and Y.
const SPIN_X: f32 = 0.1;
const SPIN_Y: f32 = -0.15;

/// The demo's scene data: graph, lights, camera and the handles it animates.
pub struct DemoScene {
    pub graph: SceneGraph,
    pub lighting: Lighting,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    spinning: Vec<NodeId>,
}

impl DemoScene {
    pub fn new(aspect: f32, ambient_intensity: f32, point_intensity: f32) -> Self {
        let mut graph = SceneGraph::new();
        let surface = ColorRgba::from_hex(0xf2f2f2);

        let sphere = graph.add(
            Node::new("sphere", 0.5)
                .with_position(Vec3::new(-3.0, 0.0, 0.0))
                .with_color(surface),
        );
        // Half-diagonal of the unit cube.
        let cube = graph.add(Node::new("cube", 0.866).with_color(surface));
        // Ring radius plus tube radius.
        let torus = graph.add(
            Node::new("torus", 0.8)
                .with_position(Vec3::new(3.0, 0.0, 0.0))
                .with_color(surface),
        );
        // 12 x 12 plane, bounded by its half-width.
        graph.add(
            Node::new("plane", 6.0)
                .with_position(Vec3::new(0.0, -2.0, 0.0))
                .with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))
                .with_color(ColorRgba::from_hex(0x3a3a3a)),
        );

        let lighting = Lighting {
            ambient: AmbientLight {
                color: ColorRgba::white(),
                intensity: ambient_intensity,
            },
            point: PointLight {
                color: ColorRgba::white(),
                intensity: point_intensity,
                position: Vec3::ZERO,
            },
        };

        let camera = PerspectiveCamera::new(75.0, aspect)
            .with_position(Vec3::new(0.0, 0.0, 5.0))
            .looking_at(Vec3::ZERO);

        Self {
            graph,
            lighting,
            camera,
            controls: OrbitControls::new().with_damping(true),
            spinning: vec![sphere, cube, torus],
        }
    }

    /// Sets the spin of every animated node from the elapsed time.
    pub fn animate(&mut self, elapsed: f64) {
        let t = elapsed as f32;
        for &id in &self.spinning {
            if let Some(transform) = self.graph.transform_mut(id) {
                transform.rotation.x = SPIN_X * t;
                transform.rotation.y = SPIN_Y * t;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation_of(scene: &DemoScene, name: &str) -> Vec3 {
        let id = scene.graph.find(name).unwrap();
        scene.graph.node(id).unwrap().transform.rotation
    }

    #[test]
    fn layout_matches_the_scene_description() {
        let scene = DemoScene::new(16.0 / 9.0, 1.0, 1.0);
        assert_eq!(scene.graph.len(), 4);

        let position = |name: &str| {
            let id = scene.graph.find(name).unwrap();
            scene.graph.node(id).unwrap().transform.position
        };
        assert_eq!(position("sphere"), Vec3::new(-3.0, 0.0, 0.0));
        assert_eq!(position("cube"), Vec3::ZERO);
        assert_eq!(position("torus"), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(position("plane"), Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(rotation_of(&scene, "plane").x, -FRAC_PI_2);

        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(scene.camera.fov_y_degrees, 75.0);
        assert!(scene.controls.enable_damping);
    }

    #[test]
    fn animate_is_a_pure_function_of_elapsed() {
        let mut scene = DemoScene::new(1.0, 1.0, 1.0);
        scene.animate(10.0);

        for name in ["sphere", "cube", "torus"] {
            let r = rotation_of(&scene, name);
            assert!((r.x - 1.0).abs() < 1e-6, "{name}: {r:?}");
            assert!((r.y + 1.5).abs() < 1e-6, "{name}: {r:?}");
        }
        assert_eq!(rotation_of(&scene, "plane").y, 0.0);

        scene.animate(0.0);
        assert_eq!(rotation_of(&scene, "cube"), Vec3::ZERO);
    }
}
