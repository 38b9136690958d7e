//! Marker for entities exempt from scene teardown.
//!
//! Observers and other long-lived entities carry [`Persistent`] so that
//! destroying the scene graph leaves them alone.

use bevy_ecs::prelude::Component;

/// Tag component: the entity survives scene-graph teardown.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
