//! Window size tracking.
//!
//! Compares the OS window dimensions against the stored
//! [`WindowSize`](crate::resources::windowsize::WindowSize) once per frame
//! and triggers
//! [`WindowResizedEvent`](crate::events::resize::WindowResizedEvent) on
//! change. The observer in `crate::events::resize` forwards the new aspect
//! ratio to the camera.

use bevy_ecs::prelude::*;
use raylib::prelude::RaylibHandle;

use crate::events::resize::WindowResizedEvent;
use crate::resources::windowsize::WindowSize;

/// Refresh [`WindowSize`] from raylib and notify on change.
pub fn track_window_size(
    rl: NonSend<RaylibHandle>,
    mut size: ResMut<WindowSize>,
    mut commands: Commands,
) {
    let current = WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };
    if current != *size {
        *size = current;
        commands.trigger(WindowResizedEvent {
            width: current.w,
            height: current.h,
        });
    }
}
