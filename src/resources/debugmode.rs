//! Debug overlay toggle resource.
//!
//! Presence of this resource is the switch: when absent, no debug overlay
//! or extra diagnostics are built at all. Inserted at startup only when the
//! viewer was launched with `--debug`, and flipped at runtime by
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may draw overlays or log extra
/// diagnostics.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
