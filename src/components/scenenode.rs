//! Scene graph node marker component.
//!
//! Every entity that belongs to the renderable scene graph carries a
//! [`SceneNode`]. Nodes hang off the scene root entity through
//! `bevy_ecs::hierarchy::ChildOf`, and teardown walks that tree depth-first.

use bevy_ecs::prelude::Component;

/// Named node in the scene graph.
#[derive(Component, Clone, Debug)]
pub struct SceneNode {
    /// Human-readable node name, used for logs and picking reports.
    pub name: String,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
