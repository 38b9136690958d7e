//! Per-frame input resource.
//!
//! Physical keys are translated into the logical actions the viewer
//! understands through per-action binding lists. The transition logic is a
//! pure function over `(key, pressed)` edges so it can be exercised without
//! a window; the raylib polling system feeds real hardware edges through it.

use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;
use smallvec::SmallVec;

use crate::events::input::InputAction;

/// Boolean action state with its physical key bindings.
#[derive(Debug, Clone, Default)]
pub struct BoolState {
    /// Whether the action is currently held.
    pub active: bool,
    /// Whether the action was pressed this frame.
    pub just_pressed: bool,
    /// Whether the action was released this frame.
    pub just_released: bool,
    /// Keys bound to this action.
    pub bindings: SmallVec<[KeyboardKey; 2]>,
}

impl BoolState {
    fn bound(keys: &[KeyboardKey]) -> Self {
        Self {
            bindings: SmallVec::from_slice(keys),
            ..Self::default()
        }
    }
}

/// Resource capturing the per-frame input state relevant to the viewer.
///
/// Movement actions accept both WASD and the arrow keys, matching the
/// conventional dual binding.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub space: BoolState,
    pub shift: BoolState,
    /// Latch for the first-user-gesture event; set once, never cleared.
    gesture_seen: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            up: BoolState::bound(&[KeyboardKey::KEY_W, KeyboardKey::KEY_UP]),
            down: BoolState::bound(&[KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN]),
            left: BoolState::bound(&[KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT]),
            right: BoolState::bound(&[KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT]),
            space: BoolState::bound(&[KeyboardKey::KEY_SPACE]),
            shift: BoolState::bound(&[
                KeyboardKey::KEY_LEFT_SHIFT,
                KeyboardKey::KEY_RIGHT_SHIFT,
            ]),
            gesture_seen: false,
        }
    }
}

impl InputState {
    /// Clear the per-frame edge flags. Call at the top of each frame before
    /// applying new edges.
    pub fn begin_frame(&mut self) {
        for (_, state) in self.states_mut() {
            state.just_pressed = false;
            state.just_released = false;
        }
    }

    /// Apply a physical key edge. Returns the logical action the key maps
    /// to, if any; unmapped keys leave the state untouched.
    pub fn apply_key(&mut self, key: KeyboardKey, pressed: bool) -> Option<InputAction> {
        for (action, state) in self.states_mut() {
            if state.bindings.contains(&key) {
                state.active = pressed;
                if pressed {
                    state.just_pressed = true;
                } else {
                    state.just_released = true;
                }
                return Some(action);
            }
        }
        None
    }

    /// Read the state of a logical action.
    pub fn action(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::Up => &self.up,
            InputAction::Down => &self.down,
            InputAction::Left => &self.left,
            InputAction::Right => &self.right,
            InputAction::Space => &self.space,
            InputAction::Shift => &self.shift,
        }
    }

    /// All keys bound to any action.
    pub fn bound_keys(&self) -> Vec<KeyboardKey> {
        [
            &self.up, &self.down, &self.left, &self.right, &self.space, &self.shift,
        ]
        .iter()
        .flat_map(|s| s.bindings.iter().copied())
        .collect()
    }

    /// Refresh `active` for every action from a key-down predicate. Any
    /// bound key held keeps the action active.
    pub fn refresh_active(&mut self, is_down: impl Fn(KeyboardKey) -> bool) {
        for (_, state) in self.states_mut() {
            state.active = state.bindings.iter().any(|&k| is_down(k));
        }
    }

    /// Record a user gesture. Returns true only for the very first one.
    pub fn note_gesture(&mut self) -> bool {
        if self.gesture_seen {
            false
        } else {
            self.gesture_seen = true;
            true
        }
    }

    fn states_mut(&mut self) -> [(InputAction, &mut BoolState); 6] {
        [
            (InputAction::Up, &mut self.up),
            (InputAction::Down, &mut self.down),
            (InputAction::Left, &mut self.left),
            (InputAction::Right, &mut self.right),
            (InputAction::Space, &mut self.space),
            (InputAction::Shift, &mut self.shift),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_inactive() {
        let input = InputState::default();
        assert!(!input.up.active);
        assert!(!input.down.active);
        assert!(!input.left.active);
        assert!(!input.right.active);
        assert!(!input.space.active);
        assert!(!input.shift.active);
        assert!(!input.up.just_pressed);
    }

    #[test]
    fn wasd_and_arrows_map_to_the_same_actions() {
        let mut input = InputState::default();
        assert_eq!(
            input.apply_key(KeyboardKey::KEY_W, true),
            Some(InputAction::Up)
        );
        assert!(input.up.active);
        assert!(input.up.just_pressed);

        input.begin_frame();
        assert_eq!(
            input.apply_key(KeyboardKey::KEY_UP, false),
            Some(InputAction::Up)
        );
        assert!(!input.up.active);
        assert!(input.up.just_released);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut input = InputState::default();
        assert_eq!(input.apply_key(KeyboardKey::KEY_F5, true), None);
        assert!(!input.up.active);
    }

    #[test]
    fn either_shift_key_drives_shift() {
        let mut input = InputState::default();
        assert_eq!(
            input.apply_key(KeyboardKey::KEY_RIGHT_SHIFT, true),
            Some(InputAction::Shift)
        );
        assert!(input.action(InputAction::Shift).active);
    }

    #[test]
    fn gesture_latch_fires_once() {
        let mut input = InputState::default();
        assert!(input.note_gesture());
        assert!(!input.note_gesture());
        assert!(!input.note_gesture());
    }
}
