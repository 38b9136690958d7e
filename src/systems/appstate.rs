//! App state systems and run conditions.

use bevy_ecs::prelude::*;

use crate::events::appstate::AppStateChangedEvent;
use crate::resources::appstate::{AppState, AppStates, NextAppState, NextAppStates};

/// Emit the state-change event whenever a transition is pending.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextAppState>) {
    if let NextAppStates::Pending(_) = next_state.get() {
        commands.trigger(AppStateChangedEvent {});
    }
}

/// Run condition: the viewer reached the `Running` state.
pub fn state_is_running(state: Res<AppState>) -> bool {
    matches!(state.get(), AppStates::Running)
}

/// Run condition: assets are still resolving.
pub fn state_is_loading(state: Res<AppState>) -> bool {
    matches!(state.get(), AppStates::Loading)
}
