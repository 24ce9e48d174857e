//! Retained scene data consumed by the render callback.
//!
//! Responsibilities:
//! - hold animatable nodes behind stable [`NodeId`] handles
//! - camera projection that follows viewport changes
//! - damped orbit controls
//! - project the scene into a renderer-agnostic [`Frame`](crate::render::Frame)

mod camera;
mod controls;
mod graph;
mod lights;
mod snapshot;

pub use camera::PerspectiveCamera;
pub use controls::OrbitControls;
pub use graph::{Node, NodeId, SceneGraph, Transform};
pub use lights::{AmbientLight, Lighting, PointLight};
pub use snapshot::build_frame;
