//! Vantage Engine library.
//!
//! Exposes the engine's ECS components, resources, systems, events, scenes
//! and the experience orchestrator for use in integration tests and as a
//! reusable library. The core is window-free; the binary layers raylib on
//! top.

pub mod components;
pub mod events;
pub mod experience;
pub mod resources;
pub mod scenes;
pub mod systems;
