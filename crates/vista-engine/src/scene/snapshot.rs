use glam::Vec3;

use crate::render::{ColorRgba, Frame, Marker};
use crate::viewport::ViewportState;

use super::{Lighting, PerspectiveCamera, SceneGraph};

/// Local axis whose view-space direction places a marker's highlight.
const HIGHLIGHT_AXIS: Vec3 = Vec3::new(0.0, 0.6, 0.8);

/// Projects `graph` through `camera` into a [`Frame`].
///
/// Nodes behind the near plane or beyond the far plane are culled. Markers
/// come out back to front.
pub fn build_frame(
    graph: &SceneGraph,
    camera: &PerspectiveCamera,
    lighting: &Lighting,
    viewport: &ViewportState,
    clear: ColorRgba,
) -> Frame {
    let view = camera.view();
    let view_proj = camera.projection() * view;
    let focal_px =
        camera.focal_length_px(viewport.height() as f32) * viewport.pixel_density() as f32;

    let mut markers: Vec<Marker> = graph
        .iter()
        .filter_map(|(_, node)| {
            let model = node.transform.matrix();
            let world = model.transform_point3(Vec3::ZERO);
            let clip = view_proj * world.extend(1.0);
            if clip.w <= camera.near {
                return None;
            }

            let ndc = clip.truncate() / clip.w;
            if !(0.0..=1.0).contains(&ndc.z) {
                return None;
            }

            let radius = node.radius * node.transform.scale.abs().max_element();
            let axis = view
                .transform_vector3(model.transform_vector3(HIGHLIGHT_AXIS))
                .normalize_or_zero();
            Some(Marker {
                center: ndc.truncate(),
                depth: ndc.z,
                radius_px: radius * focal_px / clip.w,
                color: lighting.illuminate(node.color, world),
                highlight: axis.truncate(),
            })
        })
        .collect();

    markers.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    Frame { clear, markers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessTarget;
    use crate::scene::Node;
    use crate::viewport::ViewportManager;

    fn setup(width: u32, height: u32) -> (PerspectiveCamera, ViewportManager) {
        let vm = ViewportManager::initialize(width, height, 2.0);
        let cam = PerspectiveCamera::new(75.0, vm.state().aspect() as f32)
            .with_position(Vec3::new(0.0, 0.0, 5.0))
            .looking_at(Vec3::ZERO);
        (cam, vm)
    }

    #[test]
    fn centred_node_projects_to_origin() {
        let (cam, vm) = setup(600, 600);
        let mut graph = SceneGraph::new();
        graph.add(Node::new("cube", 0.5));

        let frame = build_frame(&graph, &cam, &Lighting::default(), vm.state(), ColorRgba::black());
        assert_eq!(frame.markers.len(), 1);

        let m = frame.markers[0];
        assert!(m.center.length() < 1e-5);
        let expected = 0.5 * cam.focal_length_px(600.0) / 5.0;
        assert!((m.radius_px - expected).abs() < 1e-3);
    }

    #[test]
    fn node_behind_camera_is_culled() {
        let (cam, vm) = setup(800, 600);
        let mut graph = SceneGraph::new();
        graph.add(Node::new("behind", 1.0).with_position(Vec3::new(0.0, 0.0, 10.0)));

        let frame = build_frame(&graph, &cam, &Lighting::default(), vm.state(), ColorRgba::black());
        assert!(frame.markers.is_empty());
    }

    #[test]
    fn markers_are_sorted_back_to_front() {
        let (cam, vm) = setup(800, 600);
        let mut graph = SceneGraph::new();
        graph.add(Node::new("near", 0.5).with_position(Vec3::new(0.0, 0.0, 2.0)));
        graph.add(Node::new("far", 0.5).with_position(Vec3::new(0.0, 0.0, -4.0)));

        let frame = build_frame(&graph, &cam, &Lighting::default(), vm.state(), ColorRgba::black());
        assert_eq!(frame.markers.len(), 2);
        assert!(frame.markers[0].depth > frame.markers[1].depth);
        assert!(frame.markers[0].radius_px < frame.markers[1].radius_px);
    }

    #[test]
    fn wider_viewport_pulls_side_nodes_inward() {
        let (mut cam, mut vm) = setup(800, 600);
        let mut graph = SceneGraph::new();
        graph.add(Node::new("sphere", 0.5).with_position(Vec3::new(-3.0, 0.0, 0.0)));
        let lighting = Lighting::default();

        let before = build_frame(&graph, &cam, &lighting, vm.state(), ColorRgba::black());

        let mut target = HeadlessTarget::new();
        let aspect = vm.on_resize(1600, 600, &mut target).aspect();
        cam.set_aspect(aspect as f32);
        let after = build_frame(&graph, &cam, &lighting, vm.state(), ColorRgba::black());

        let x0 = before.markers[0].center.x;
        let x1 = after.markers[0].center.x;
        assert!(x0 < 0.0 && x1 < 0.0);
        assert!(x1.abs() < x0.abs());
    }

    #[test]
    fn rotation_moves_the_highlight() {
        let (cam, vm) = setup(800, 600);
        let mut graph = SceneGraph::new();
        let id = graph.add(Node::new("cube", 0.5));
        let lighting = Lighting::default();

        let rest = build_frame(&graph, &cam, &lighting, vm.state(), ColorRgba::black());
        // Facing the camera, the axis leans straight up on the disc.
        let h0 = rest.markers[0].highlight;
        assert!(h0.x.abs() < 1e-5 && (h0.y - 0.6).abs() < 1e-5, "{h0:?}");

        if let Some(t) = graph.transform_mut(id) {
            t.rotation = Vec3::new(1.0, -1.5, 0.0);
        }
        let spun = build_frame(&graph, &cam, &lighting, vm.state(), ColorRgba::black());
        let h1 = spun.markers[0].highlight;

        assert!(h1.distance(h0) > 0.1, "{h0:?} -> {h1:?}");
        assert!(h1.length() <= 1.0 + 1e-5);
        assert_eq!(spun.markers[0].center, rest.markers[0].center);
    }

    #[test]
    fn radius_follows_pixel_density() {
        let (cam, mut vm) = setup(800, 600);
        let mut graph = SceneGraph::new();
        graph.add(Node::new("cube", 0.5));
        let lighting = Lighting::default();

        let one = build_frame(&graph, &cam, &lighting, vm.state(), ColorRgba::black());
        vm.set_device_pixel_density(2.0, &mut HeadlessTarget::new());
        let two = build_frame(&graph, &cam, &lighting, vm.state(), ColorRgba::black());

        assert!((two.markers[0].radius_px - 2.0 * one.markers[0].radius_px).abs() < 1e-3);
    }
}
