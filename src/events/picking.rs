//! Picking events.

use bevy_ecs::prelude::{Entity, Event};

/// A scene node was clicked with the left mouse button.
#[derive(Event, Debug, Clone)]
pub struct NodePickedEvent {
    pub entity: Entity,
    /// Name of the picked [`SceneNode`](crate::components::scenenode::SceneNode).
    pub name: String,
}
