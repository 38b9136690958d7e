//! Internal render resolution resource.
//!
//! The fixed resolution the scene is rendered at before being scaled to the
//! window. Distinct from [`WindowSize`](crate::resources::windowsize::WindowSize),
//! which tracks the OS window.

use bevy_ecs::prelude::Resource;

/// Internal render resolution in pixels.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}
