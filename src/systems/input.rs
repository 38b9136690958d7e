//! Input systems.
//!
//! [`update_input_state`] reads hardware input from raylib each frame,
//! feeds key edges through the logical action mapping in
//! [`InputState`](crate::resources::input::InputState), and triggers the
//! typed input events. The escape key requests a quit; F11 toggles the
//! debug overlay.

use bevy_ecs::prelude::*;
use raylib::prelude::{KeyboardKey, MouseButton, RaylibHandle};

use crate::events::input::{FirstGestureEvent, InputEvent, MouseButtonEvent, RawKeyEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::appstate::{AppStates, NextAppState};
use crate::resources::input::InputState;

const MOUSE_BUTTONS: [MouseButton; 2] = [
    MouseButton::MOUSE_BUTTON_LEFT,
    MouseButton::MOUSE_BUTTON_RIGHT,
];

/// Poll raylib for keyboard and mouse input, update [`InputState`] and
/// trigger the per-edge events.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    mut rl: NonSendMut<RaylibHandle>,
    mut next_state: ResMut<NextAppState>,
    mut commands: Commands,
) {
    input.begin_frame();

    // key-down edges, mapped or not, in press order
    while let Some(key) = rl.get_key_pressed() {
        commands.trigger(RawKeyEvent { key, pressed: true });
        if let Some(action) = input.apply_key(key, true) {
            commands.trigger(InputEvent {
                action,
                pressed: true,
            });
        }
        match key {
            KeyboardKey::KEY_F11 => commands.trigger(SwitchDebugEvent {}),
            KeyboardKey::KEY_ESCAPE => next_state.set(AppStates::Quitting),
            _ => {}
        }
    }

    // raylib keeps no release queue, poll the bound keys for up edges
    for key in input.bound_keys() {
        if rl.is_key_released(key) {
            commands.trigger(RawKeyEvent {
                key,
                pressed: false,
            });
            if let Some(action) = input.apply_key(key, false) {
                commands.trigger(InputEvent {
                    action,
                    pressed: false,
                });
            }
        }
    }

    // held state can drift from edges alone (e.g. focus loss), re-poll it
    input.refresh_active(|key| rl.is_key_down(key));

    let position = rl.get_mouse_position();
    for button in MOUSE_BUTTONS {
        if rl.is_mouse_button_pressed(button) {
            commands.trigger(MouseButtonEvent {
                button,
                pressed: true,
                x: position.x,
                y: position.y,
            });
            if button == MouseButton::MOUSE_BUTTON_LEFT && input.note_gesture() {
                commands.trigger(FirstGestureEvent);
            }
        }
        if rl.is_mouse_button_released(button) {
            commands.trigger(MouseButtonEvent {
                button,
                pressed: false,
                x: position.x,
                y: position.y,
            });
        }
    }
}
