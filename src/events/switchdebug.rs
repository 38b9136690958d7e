//! Event and observer to toggle the debug overlay at runtime.
//!
//! Presence of [`DebugMode`] is the switch: the observer inserts or removes
//! the resource. When the viewer was started without `--debug` the overlay
//! still becomes available through this toggle, matching the keyboard
//! shortcut behavior.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::debugmode::DebugMode;

/// Toggle the [`DebugMode`] resource on/off.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

/// Observer that flips the presence of [`DebugMode`].
pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
) {
    if debug_mode.is_some() {
        commands.remove_resource::<DebugMode>();
        info!("debug mode disabled");
    } else {
        commands.insert_resource(DebugMode {});
        info!("debug mode enabled");
    }
}
