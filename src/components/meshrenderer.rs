//! Renderable mesh component.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector3};

/// Geometry drawn for a scene node.
///
/// A closed set of shapes the render system knows how to submit. `Model`
/// references a key in the non-send model store; the bytes behind it stay in
/// the asset store and are uploaded by scene setup when a window exists.
#[derive(Clone, Debug)]
pub enum MeshShape {
    /// Axis-aligned box with the given extents.
    Cube { size: Vector3 },
    /// Ground plane centered on the node position.
    Plane { width: f32, depth: f32 },
    /// Model loaded from the model store under this key.
    Model { model_key: String },
}

/// Component attaching drawable geometry to a scene node.
#[derive(Component, Clone, Debug)]
pub struct MeshRenderer {
    pub shape: MeshShape,
    pub tint: Color,
}

impl MeshRenderer {
    pub fn cube(size: Vector3, tint: Color) -> Self {
        Self {
            shape: MeshShape::Cube { size },
            tint,
        }
    }

    pub fn plane(width: f32, depth: f32, tint: Color) -> Self {
        Self {
            shape: MeshShape::Plane { width, depth },
            tint,
        }
    }

    pub fn model(model_key: impl Into<String>, tint: Color) -> Self {
        Self {
            shape: MeshShape::Model {
                model_key: model_key.into(),
            },
            tint,
        }
    }

    /// Half extents of the shape's bounding box, for picking.
    ///
    /// Models fall back to a unit half-extent box; the store does not expose
    /// mesh bounds headlessly.
    pub fn half_extents(&self) -> Vector3 {
        match &self.shape {
            MeshShape::Cube { size } => Vector3::new(size.x * 0.5, size.y * 0.5, size.z * 0.5),
            MeshShape::Plane { width, depth } => Vector3::new(width * 0.5, 0.01, depth * 0.5),
            MeshShape::Model { .. } => Vector3::new(1.0, 1.0, 1.0),
        }
    }
}
