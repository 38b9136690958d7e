//! Window resize event and observer.
//!
//! The per-frame tracking system triggers [`WindowResizedEvent`] whenever the
//! OS window size changes. The observer forwards the new aspect ratio to the
//! camera; the render system reads
//! [`WindowSize`](crate::resources::windowsize::WindowSize) directly every
//! frame for letterbox placement, so no renderer callback is needed.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::camera::SceneCamera;

/// The OS window dimensions changed.
#[derive(Event, Debug, Clone, Copy)]
pub struct WindowResizedEvent {
    pub width: i32,
    pub height: i32,
}

/// Observer: update the camera projection for the new aspect ratio.
pub fn on_window_resized(
    trigger: On<WindowResizedEvent>,
    camera: Option<ResMut<SceneCamera>>,
) {
    let event = trigger.event();
    debug!("window resized to {}x{}", event.width, event.height);
    if let Some(mut camera) = camera {
        camera.resize(event.width, event.height);
    }
}
