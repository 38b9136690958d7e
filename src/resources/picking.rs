//! Hover state for mouse picking.

use bevy_ecs::prelude::{Entity, Resource};

/// The scene node currently under the cursor, if any.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HoverState {
    pub hovered: Option<Entity>,
}
