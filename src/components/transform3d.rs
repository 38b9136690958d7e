//! World-space transform for scene nodes.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Position, Y-axis rotation and uniform scale of a scene node.
///
/// The viewer only needs yaw rotation; full orientation stays with the
/// graphics library's model matrices.
#[derive(Component, Clone, Copy, Debug)]
pub struct Transform3D {
    pub position: Vector3,
    /// Rotation around the world Y axis, in degrees.
    pub yaw_degrees: f32,
    pub scale: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            yaw_degrees: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform3D {
    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::default()
        }
    }
}
