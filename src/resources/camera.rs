//! Scene camera resource.
//!
//! An orbit camera described by position, target and vertical field of view.
//! The resource itself is plain data so it works headlessly; the windowed
//! render path converts it to a raylib `Camera3D` each frame. The transform
//! can be captured to and restored from the session state.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera3D, Vector3};

use crate::resources::session::CameraPose;

const DEFAULT_FOVY: f32 = 45.0;
const MIN_DISTANCE: f32 = 0.5;

/// Perspective orbit camera.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneCamera {
    pub position: Vector3,
    pub target: Vector3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Width / height of the projection.
    pub aspect: f32,
}

impl SceneCamera {
    /// Camera looking at the origin from a raised three-quarter view.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vector3::new(6.0, 5.0, 6.0),
            target: Vector3::zero(),
            fovy: DEFAULT_FOVY,
            aspect,
        }
    }

    /// Update the projection for new viewport dimensions.
    pub fn resize(&mut self, width: i32, height: i32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Rotate the camera around its target. Angles in degrees; pitch is
    /// clamped so the camera never crosses the pole.
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let offset = self.position - self.target;
        let radius = offset.length().max(MIN_DISTANCE);

        let mut yaw = offset.z.atan2(offset.x);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        yaw += yaw_delta.to_radians();
        pitch = (pitch + pitch_delta.to_radians()).clamp(-1.4, 1.4);

        self.position = self.target
            + Vector3::new(
                radius * pitch.cos() * yaw.cos(),
                radius * pitch.sin(),
                radius * pitch.cos() * yaw.sin(),
            );
    }

    /// Move toward (factor < 1) or away from (factor > 1) the target.
    pub fn dolly(&mut self, factor: f32) {
        let offset = self.position - self.target;
        let radius = (offset.length() * factor).max(MIN_DISTANCE);
        self.position = self.target + offset.normalized() * radius;
    }

    /// Distance from the camera to its target.
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// Snapshot of the transform for session persistence.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: [self.position.x, self.position.y, self.position.z],
            target: [self.target.x, self.target.y, self.target.z],
        }
    }

    /// Restore a previously captured transform.
    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.position = Vector3::new(pose.position[0], pose.position[1], pose.position[2]);
        self.target = Vector3::new(pose.target[0], pose.target[1], pose.target[2]);
    }

    /// Raylib camera for the render pass.
    pub fn to_raylib(&self) -> Camera3D {
        Camera3D::perspective(
            self.position,
            self.target,
            Vector3::new(0.0, 1.0, 0.0),
            self.fovy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn resize_updates_aspect() {
        let mut camera = SceneCamera::new(16.0 / 9.0);
        camera.resize(800, 400);
        assert!((camera.aspect - 2.0).abs() < EPSILON);
        // degenerate sizes are ignored
        camera.resize(0, 400);
        assert!((camera.aspect - 2.0).abs() < EPSILON);
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut camera = SceneCamera::new(1.0);
        let before = camera.distance();
        camera.orbit(35.0, -10.0);
        assert!((camera.distance() - before).abs() < 1e-2);
    }

    #[test]
    fn dolly_scales_distance_with_floor() {
        let mut camera = SceneCamera::new(1.0);
        let before = camera.distance();
        camera.dolly(0.5);
        assert!((camera.distance() - before * 0.5).abs() < 1e-2);
        camera.dolly(1e-6);
        assert!(camera.distance() >= MIN_DISTANCE - EPSILON);
    }

    #[test]
    fn pose_roundtrip_restores_the_transform() {
        let mut camera = SceneCamera::new(1.0);
        camera.orbit(120.0, 20.0);
        let pose = camera.pose();

        let mut restored = SceneCamera::new(1.0);
        restored.apply_pose(&pose);
        assert!((restored.position - camera.position).length() < EPSILON);
        assert!((restored.target - camera.target).length() < EPSILON);
    }
}
