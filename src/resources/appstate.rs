//! High-level app state resources.
//!
//! These track the authoritative lifecycle state of the viewer and any
//! pending transition requested by systems. See
//! `crate::events::appstate::observe_appstate_change_event` for how a
//! transition is applied and enter hooks are invoked.

use bevy_ecs::prelude::Resource;

/// Discrete lifecycle states of the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppStates {
    #[default]
    None,
    /// Asset manifest dispatched, waiting for outcomes.
    Loading,
    /// Scene constructed, frame loop live.
    Running,
    Quitting,
}

/// Representation of a requested next state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextAppStates {
    #[default]
    Unchanged,
    Pending(AppStates),
}

/// Authoritative current app state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppState {
    current: AppStates,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            current: AppStates::None,
        }
    }

    pub fn get(&self) -> &AppStates {
        &self.current
    }

    /// Update the current state immediately.
    ///
    /// Prefer requesting transitions via [`NextAppState`] so the enter hooks
    /// run through the state-change observer.
    pub fn set(&mut self, state: AppStates) {
        self.current = state;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Intent to change to a new app state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NextAppState {
    next: NextAppStates,
}

impl NextAppState {
    pub fn new() -> Self {
        NextAppState {
            next: NextAppStates::Unchanged,
        }
    }

    pub fn get(&self) -> &NextAppStates {
        &self.next
    }

    /// Request a transition; the `check_pending_state` system emits the
    /// change event on the next frame.
    pub fn set(&mut self, next: AppStates) {
        self.next = NextAppStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextAppStates::Unchanged;
    }
}

impl Default for NextAppState {
    fn default() -> Self {
        Self::new()
    }
}
