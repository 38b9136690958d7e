//! Commands and messages for the background audio thread.
//!
//! Playback only: the thread lazily loads music streams on first play and
//! caches them by name, so there is no separate preload step. Ambient
//! autoplay waits for the first user gesture
//! ([`FirstGestureEvent`](crate::events::input::FirstGestureEvent)).

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread. Also flows through the ECS message
/// queue so any system can request playback.
#[derive(Message, Debug, Clone)]
pub enum AudioCmd {
    /// Play a stream, loading it from `path` on first use.
    Play {
        name: String,
        path: String,
        looped: bool,
        volume: f32,
    },
    Stop { name: String },
    StopAll,
    Shutdown,
}

/// Replies sent *back* from the audio thread.
#[derive(Message, Debug, Clone)]
pub enum AudioMessage {
    Started { name: String },
    Stopped { name: String },
    /// Reached the end of a non-looping stream.
    Finished { name: String },
    PlayFailed { name: String, error: String },
}
