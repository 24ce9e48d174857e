use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::render::ColorRgba;

/// Position, Euler rotation (XYZ, radians) and scale of a node.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.position)
    }
}

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

/// A renderable object: a named transform with a bounding radius and color.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    /// Bounding radius in world units at scale 1.
    pub radius: f32,
    pub color: ColorRgba,
}

impl Node {
    pub fn new(name: impl Into<String>, radius: f32) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            radius,
            color: ColorRgba::white(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_color(mut self, color: ColorRgba) -> Self {
        self.color = color;
        self
    }
}

/// Flat collection of nodes addressed by [`NodeId`].
///
/// Nodes are never removed, so handles stay valid for the graph's lifetime.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|n| &mut n.transform)
    }

    /// First node with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_address_their_nodes() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Node::new("a", 1.0));
        let b = graph.add(Node::new("b", 2.0).with_position(Vec3::X));

        assert_eq!(graph.node(a).map(|n| n.name.as_str()), Some("a"));
        assert_eq!(graph.node(b).map(|n| n.transform.position), Some(Vec3::X));
        assert_eq!(graph.find("b"), Some(b));
        assert_eq!(graph.find("c"), None);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn transform_mut_edits_in_place() {
        let mut graph = SceneGraph::new();
        let id = graph.add(Node::new("cube", 0.5));
        if let Some(t) = graph.transform_mut(id) {
            t.rotation.y = 1.25;
        }
        assert_eq!(graph.node(id).unwrap().transform.rotation.y, 1.25);
    }

    #[test]
    fn matrix_applies_scale_rotation_translation() {
        let t = Transform {
            position: Vec3::new(0.0, -2.0, 0.0),
            rotation: Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
            scale: Vec3::splat(2.0),
        };
        let m = t.matrix();

        assert!(m.transform_point3(Vec3::ZERO).abs_diff_eq(t.position, 1e-6));
        // -90 degrees about X turns local +Y into world -Z.
        let up = m.transform_vector3(Vec3::Y);
        assert!(up.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5), "{up:?}");
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }
}
