//! Event types and observers used by the engine.
//!
//! Every event is a closed type with its own payload; there are no dynamic
//! event names. Cross-thread traffic (loader, audio) uses `Messages<T>`
//! queues drained once per frame; broadcast notifications use ECS events and
//! observers. Triggering an event nobody observes is a no-op.
//!
//! Submodules:
//! - [`appstate`] – state transition notifications for the app lifecycle
//! - [`assets`] – loader commands, per-asset outcomes, the ready signal
//! - [`audio`] – commands and replies for the background audio thread
//! - [`input`] – logical actions, raw keys, mouse buttons, first gesture
//! - [`picking`] – scene node click notifications
//! - [`resize`] – window resize notification and camera update observer
//! - [`switchdebug`] – toggle the debug overlay on/off

pub mod appstate;
pub mod assets;
pub mod audio;
pub mod input;
pub mod picking;
pub mod resize;
pub mod switchdebug;
