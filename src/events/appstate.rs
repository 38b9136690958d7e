//! App state transition event and observer.
//!
//! Systems request a transition by updating
//! [`NextAppState`](crate::resources::appstate::NextAppState) and triggering
//! [`AppStateChangedEvent`]. The observer applies the transition to
//! [`AppState`](crate::resources::appstate::AppState) and runs the enter hook
//! registered for the new state: `Loading` dispatches the asset manifest,
//! `Running` runs the active scene's setup system from the scene registry.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::resources::appstate::NextAppStates::{Pending, Unchanged};
use crate::resources::appstate::{AppState, AppStates, NextAppState};
use crate::resources::scenestore::SceneRegistry;

/// Apply a pending app state transition, if any.
#[derive(Event, Debug, Clone, Copy)]
pub struct AppStateChangedEvent {}

/// Observer that applies a pending state transition and runs enter hooks.
///
/// Contract
/// - Reads the intention from [`NextAppState`]; does nothing when unchanged.
/// - On a pending transition, updates [`AppState`], clears the request, then
///   runs the enter hook for the new state.
/// - Missing resources are logged and the event is ignored.
pub fn observe_appstate_change_event(
    _trigger: On<AppStateChangedEvent>,
    mut commands: Commands,
    mut next_state: Option<ResMut<NextAppState>>,
    mut state: Option<ResMut<AppState>>,
    registry: Res<SceneRegistry>,
) {
    debug!("AppStateChangedEvent triggered");

    let (Some(next_state), Some(state)) = (next_state.as_deref_mut(), state.as_deref_mut()) else {
        warn!("app state resources missing, ignoring state change event");
        return;
    };

    let pending = next_state.get().clone();
    match pending {
        Pending(new_state) => {
            info!("transitioning from {:?} to {:?}", state.get(), new_state);
            state.set(new_state.clone());
            next_state.reset();
            on_state_enter(&new_state, &mut commands, &registry);
        }
        Unchanged => {
            debug!("no state change pending");
        }
    }
}

/// Run the enter hook for the given state.
fn on_state_enter(state: &AppStates, commands: &mut Commands, registry: &SceneRegistry) {
    match state {
        AppStates::None => debug!("entered None state"),
        AppStates::Loading => {
            if let Some(id) = registry.hook("begin_loading") {
                commands.run_system(*id);
            } else {
                warn!("no begin_loading hook registered");
            }
        }
        AppStates::Running => {
            if let Some(id) = registry.active_scene_system() {
                commands.run_system(id);
            } else {
                warn!("active scene has no setup system registered");
            }
        }
        AppStates::Quitting => info!("entered Quitting state"),
    }
}
