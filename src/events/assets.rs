//! Commands and messages for the background asset loader thread.
//!
//! The loader contract is strict: every dispatched [`LoaderCmd`] load command
//! is answered with exactly one [`AssetMessage`], either `Loaded` or
//! `LoadFailed`. Readiness is computed by counting outcomes against the
//! dispatched total, so a failing asset can never stall the loading phase.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Event;

use crate::resources::assetstore::AssetHandle;

/// Commands sent *to* the loader thread.
#[derive(Debug, Clone)]
pub enum LoaderCmd {
    LoadModel { name: String, path: String },
    LoadTexture { name: String, path: String },
    LoadCubeTexture { name: String, paths: [String; 6] },
    LoadAudio { name: String, path: String },
    Shutdown,
}

/// Outcomes sent *back* from the loader thread, one per load command.
#[derive(Message, Debug, Clone)]
pub enum AssetMessage {
    Loaded { name: String, handle: AssetHandle },
    LoadFailed { name: String, error: String },
}

/// Triggered exactly once per load phase, when every dispatched load has
/// resolved to an outcome. An empty manifest triggers it synchronously at
/// dispatch time.
#[derive(Event, Debug, Clone, Copy)]
pub struct ResourcesReadyEvent {
    /// Number of assets that loaded successfully.
    pub loaded: usize,
    /// Number of assets that failed.
    pub failed: usize,
}
