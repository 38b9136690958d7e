//! Input events.
//!
//! Raw key edges are forwarded as [`RawKeyEvent`]; keys bound to a logical
//! action additionally trigger an [`InputEvent`]. Mouse buttons trigger
//! [`MouseButtonEvent`], and the very first press of the left button also
//! triggers [`FirstGestureEvent`] exactly once per process, which the audio
//! subsystem uses as its autoplay gate.

use bevy_ecs::prelude::Event;
use raylib::prelude::{KeyboardKey, MouseButton};

/// Logical input actions the viewer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move/orbit up (default: W or Up arrow).
    Up,
    /// Move/orbit down (default: S or Down arrow).
    Down,
    /// Move/orbit left (default: A or Left arrow).
    Left,
    /// Move/orbit right (default: D or Right arrow).
    Right,
    /// Primary modifier (default: Space).
    Space,
    /// Secondary modifier (default: either Shift key).
    Shift,
}

/// A logical action was pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    pub action: InputAction,
    /// True on press, false on release.
    pub pressed: bool,
}

/// A physical key edge, mapped or not.
#[derive(Event, Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: KeyboardKey,
    pub pressed: bool,
}

/// A mouse button edge, with the cursor position in window coordinates.
#[derive(Event, Debug, Clone, Copy)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub pressed: bool,
    pub x: f32,
    pub y: f32,
}

/// First user gesture of the process. Triggered at most once; gated by a
/// latch in [`InputState`](crate::resources::input::InputState).
#[derive(Event, Debug, Clone, Copy)]
pub struct FirstGestureEvent;
