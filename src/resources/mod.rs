//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the asset manifest and stores,
//! loader and audio bridges, input state, timing, sizes, the camera, and
//! the session record. Each submodule documents the semantics of its
//! resource(s).
//!
//! Overview
//! - `appconfig` – INI-backed configuration with safe defaults
//! - `appstate` – authoritative and pending lifecycle state
//! - `assetstore` – loaded asset handles keyed by manifest name
//! - `audio` – bridge and channels for the background audio thread
//! - `camera` – orbit camera driving the 3D view
//! - `debugmode` – presence toggles the debug overlay
//! - `input` – per-frame logical action state and key bindings
//! - `loader` – bridge and progress state for the background loader thread
//! - `manifest` – validated list of assets to load
//! - `modelstore` – uploaded GPU models keyed by name
//! - `picking` – node currently under the cursor
//! - `rendertarget` – fixed-resolution framebuffer
//! - `scenestore` – registry of scene setup systems and lifecycle hooks
//! - `screensize` – internal render resolution
//! - `session` – camera transform and toggles persisted across runs
//! - `texturestore` – uploaded GPU textures keyed by name
//! - `windowsize` – OS window dimensions and letterbox math
//! - `worldtime` – simulation clock

pub mod appconfig;
pub mod appstate;
pub mod assetstore;
pub mod audio;
pub mod camera;
pub mod debugmode;
pub mod input;
pub mod loader;
pub mod manifest;
pub mod modelstore;
pub mod picking;
pub mod rendertarget;
pub mod scenestore;
pub mod screensize;
pub mod session;
pub mod texturestore;
pub mod windowsize;
pub mod worldtime;
