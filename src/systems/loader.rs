//! Asset loading systems backed by a dedicated thread.
//!
//! This module hosts the background loader thread and the systems that
//! bridge it with the ECS world:
//! - [`loader_thread`] runs on its own OS thread, performs all file I/O and
//!   answers every load command with exactly one [`AssetMessage`].
//! - [`begin_loading`] dispatches the manifest, sizes the progress counters
//!   and handles the empty-manifest case synchronously.
//! - [`poll_asset_messages`] non-blockingly drains the loader's reply
//!   channel into Bevy ECS' message queue each frame.
//! - [`update_asset_messages`] advances the message queue so newly written
//!   messages become readable in the same frame.
//! - [`apply_asset_messages`] stores handles, counts outcomes, and triggers
//!   [`ResourcesReadyEvent`] exactly once when the phase resolves.
//!
//! The loader thread only moves bytes; decoding and GPU upload belong to
//! scene code on the main thread.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info};

use crate::events::assets::{AssetMessage, LoaderCmd, ResourcesReadyEvent};
use crate::resources::appstate::{AppStates, NextAppState};
use crate::resources::assetstore::{AssetHandle, AssetStore};
use crate::resources::loader::{LoadProgress, LoaderBridge};
use crate::resources::manifest::Manifest;
use crate::resources::session::SessionState;

/// Dispatch every manifest entry to the loader thread and start the load
/// phase.
///
/// Runs as the enter hook of the `Loading` state. With an empty manifest
/// the phase resolves here and now: the ready event is triggered before the
/// hook returns to the caller's command flush.
pub fn begin_loading(
    manifest: Res<Manifest>,
    bridge: Res<LoaderBridge>,
    mut progress: ResMut<LoadProgress>,
    mut commands: Commands,
) {
    let total = manifest.len();
    progress.begin(total);
    info!("loading {total} assets");

    for source in manifest.iter() {
        if bridge.tx_cmd.send(source.to_cmd()).is_err() {
            error!("loader thread unavailable, '{}' not dispatched", source.name());
        }
    }

    if progress.try_announce_ready() {
        commands.trigger(ResourcesReadyEvent {
            loaded: 0,
            failed: 0,
        });
    }
}

/// Drain pending loader outcomes into the ECS message queue.
///
/// Non-blocking; intended to run each frame on the main thread. Tolerates a
/// missing bridge so frames after teardown stay safe.
pub fn poll_asset_messages(
    bridge: Option<Res<LoaderBridge>>,
    mut writer: MessageWriter<AssetMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Advance the ECS message queue for [`AssetMessage`].
///
/// Bevy ECS' [`Messages`] API requires calling `update()` once per frame to
/// make messages written this frame visible to readers. Run this after
/// [`poll_asset_messages`].
pub fn update_asset_messages(mut messages: ResMut<Messages<AssetMessage>>) {
    messages.update();
}

/// Store arrived handles, count outcomes, and announce readiness.
pub fn apply_asset_messages(
    mut reader: MessageReader<AssetMessage>,
    mut store: ResMut<AssetStore>,
    mut progress: ResMut<LoadProgress>,
    session: Option<Res<SessionState>>,
    mut commands: Commands,
) {
    let verbose = session.map(|s| s.toggles.resource_log).unwrap_or(false);

    for message in reader.read() {
        match message {
            AssetMessage::Loaded { name, handle } => {
                store.insert(name.clone(), handle.clone());
                progress.record_loaded();
                if verbose {
                    info!(
                        "loaded '{}' ({}/{})",
                        name,
                        progress.loaded() + progress.failed(),
                        progress.total()
                    );
                } else {
                    debug!(
                        "loaded '{}' ({}/{})",
                        name,
                        progress.loaded() + progress.failed(),
                        progress.total()
                    );
                }
            }
            AssetMessage::LoadFailed { name, error } => {
                progress.record_failed();
                error!("failed to load '{}': {}", name, error);
            }
        }
    }

    if progress.try_announce_ready() {
        info!(
            "resources ready: {} loaded, {} failed",
            progress.loaded(),
            progress.failed()
        );
        commands.trigger(ResourcesReadyEvent {
            loaded: progress.loaded(),
            failed: progress.failed(),
        });
    }
}

/// Observer: a resolved load phase advances the app into `Running`.
pub fn on_resources_ready(
    _trigger: On<ResourcesReadyEvent>,
    mut next_state: ResMut<NextAppState>,
) {
    next_state.set(AppStates::Running);
}

/// Entry point of the dedicated loader thread.
///
/// Responsibilities:
/// - Perform all asset file I/O off the main thread.
/// - Answer every load command with exactly one outcome message, success or
///   failure, so the coordinator's readiness reduction always terminates.
/// - Exit cleanly on [`LoaderCmd::Shutdown`] or when the command channel
///   disconnects.
///
/// Blocking `recv` is fine here: unlike the audio thread there is nothing
/// to pump between commands.
pub fn loader_thread(rx_cmd: Receiver<LoaderCmd>, tx_msg: Sender<AssetMessage>) {
    debug!("loader thread starting (id={:?})", std::thread::current().id());

    for cmd in rx_cmd.iter() {
        let outcome = match cmd {
            LoaderCmd::LoadModel { name, path } => load_bytes(&name, &path, |bytes| {
                AssetHandle::Model { bytes }
            }),
            LoaderCmd::LoadTexture { name, path } => load_bytes(&name, &path, |bytes| {
                AssetHandle::Texture { bytes }
            }),
            LoaderCmd::LoadAudio { name, path } => load_bytes(&name, &path, |bytes| {
                AssetHandle::Audio { bytes }
            }),
            LoaderCmd::LoadCubeTexture { name, paths } => load_cube_texture(&name, &paths),
            LoaderCmd::Shutdown => break,
        };
        if tx_msg.send(outcome).is_err() {
            // receiver gone, nothing left to report to
            break;
        }
    }

    debug!("loader thread exiting (id={:?})", std::thread::current().id());
}

fn load_bytes(
    name: &str,
    path: &str,
    into_handle: impl FnOnce(Vec<u8>) -> AssetHandle,
) -> AssetMessage {
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!("[loader] read '{}' from '{}' ({} bytes)", name, path, bytes.len());
            AssetMessage::Loaded {
                name: name.to_string(),
                handle: into_handle(bytes),
            }
        }
        Err(e) => AssetMessage::LoadFailed {
            name: name.to_string(),
            error: format!("{path}: {e}"),
        },
    }
}

/// A cube texture needs all six faces; any missing face fails the entry.
fn load_cube_texture(name: &str, paths: &[String; 6]) -> AssetMessage {
    let mut faces = Vec::with_capacity(6);
    for path in paths {
        match std::fs::read(path) {
            Ok(bytes) => faces.push(bytes),
            Err(e) => {
                return AssetMessage::LoadFailed {
                    name: name.to_string(),
                    error: format!("face {path}: {e}"),
                };
            }
        }
    }
    debug!("[loader] read cube texture '{}' (6 faces)", name);
    AssetMessage::Loaded {
        name: name.to_string(),
        handle: AssetHandle::CubeTexture { faces },
    }
}
