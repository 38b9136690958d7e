//! ECS components for entities.
//!
//! Submodules overview:
//! - [`meshrenderer`] – drawable geometry attached to a scene node
//! - [`persistent`] – marker for entities that survive scene teardown
//! - [`scenenode`] – named member of the scene graph
//! - [`spin`] – continuous yaw rotation for demo nodes
//! - [`transform3d`] – world-space position/rotation/scale

pub mod meshrenderer;
pub mod persistent;
pub mod scenenode;
pub mod spin;
pub mod transform3d;
