//! Continuous yaw rotation for demo scene nodes.

use bevy_ecs::prelude::Component;

/// Rotates the node around the Y axis every frame.
#[derive(Component, Clone, Copy, Debug)]
pub struct Spin {
    /// Degrees per second.
    pub speed: f32,
}
