//! Demo node rotation.

use bevy_ecs::prelude::*;

use crate::components::spin::Spin;
use crate::components::transform3d::Transform3D;
use crate::resources::worldtime::WorldTime;

/// Advance the yaw of every spinning node by its speed.
pub fn rotate_spinners(time: Res<WorldTime>, mut query: Query<(&Spin, &mut Transform3D)>) {
    for (spin, mut transform) in query.iter_mut() {
        transform.yaw_degrees = (transform.yaw_degrees + spin.speed * time.delta) % 360.0;
    }
}
