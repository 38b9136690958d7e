//! Keyboard camera controls.
//!
//! Left/right orbit around the target, up/down pitch, shift switches the
//! vertical pair to dollying, space resets the view. Works purely on
//! resources, so it runs headless.

use bevy_ecs::prelude::*;

use crate::resources::camera::SceneCamera;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

const ORBIT_SPEED: f32 = 90.0; // degrees per second
const DOLLY_RATE: f32 = 0.9; // distance factor per second

/// Apply held input actions to the orbit camera.
pub fn orbit_camera_from_input(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut camera: ResMut<SceneCamera>,
) {
    if input.space.just_pressed {
        *camera = SceneCamera::new(camera.aspect);
        return;
    }

    let mut yaw = 0.0;
    if input.left.active {
        yaw -= ORBIT_SPEED * time.delta;
    }
    if input.right.active {
        yaw += ORBIT_SPEED * time.delta;
    }

    let mut pitch = 0.0;
    if input.shift.active {
        // shift: the vertical pair dollies instead of pitching
        if input.up.active {
            camera.dolly(1.0 - DOLLY_RATE * time.delta);
        }
        if input.down.active {
            camera.dolly(1.0 + DOLLY_RATE * time.delta);
        }
    } else {
        if input.up.active {
            pitch += ORBIT_SPEED * time.delta;
        }
        if input.down.active {
            pitch -= ORBIT_SPEED * time.delta;
        }
    }

    if yaw != 0.0 || pitch != 0.0 {
        camera.orbit(yaw, pitch);
    }
}
