//! Mouse picking.
//!
//! Builds a world-space ray from the cursor through the camera each frame
//! and intersects it with the bounding boxes of scene nodes. The nearest
//! hit becomes the hovered node; a left click on a hovered node triggers
//! [`NodePickedEvent`](crate::events::picking::NodePickedEvent).
//!
//! Ray construction and the slab intersection test are plain functions so
//! the math is testable without a window.

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::{MouseButton, RaylibHandle, Vector3};

use crate::components::meshrenderer::MeshRenderer;
use crate::components::scenenode::SceneNode;
use crate::components::transform3d::Transform3D;
use crate::events::picking::NodePickedEvent;
use crate::resources::camera::SceneCamera;
use crate::resources::picking::HoverState;
use crate::resources::windowsize::WindowSize;

/// World-space ray from the camera through a window position.
pub fn mouse_ray(camera: &SceneCamera, x: f32, y: f32, window: &WindowSize) -> (Vector3, Vector3) {
    let width = window.w.max(1) as f32;
    let height = window.h.max(1) as f32;

    // normalized device coordinates, +y up
    let ndc_x = (2.0 * x / width) - 1.0;
    let ndc_y = 1.0 - (2.0 * y / height);

    let forward = (camera.target - camera.position).normalized();
    let world_up = Vector3::new(0.0, 1.0, 0.0);
    let right = forward.cross(world_up).normalized();
    let up = right.cross(forward);

    let half_h = (camera.fovy.to_radians() * 0.5).tan();
    let half_w = half_h * camera.aspect;

    let direction = (forward + right * (ndc_x * half_w) + up * (ndc_y * half_h)).normalized();
    (camera.position, direction)
}

/// Slab test: distance along the ray to an axis-aligned box, if hit.
pub fn ray_hits_aabb(origin: Vector3, direction: Vector3, min: Vector3, max: Vector3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for (o, d, lo, hi) in [
        (origin.x, direction.x, min.x, max.x),
        (origin.y, direction.y, min.y, max.y),
        (origin.z, direction.z, min.z, max.z),
    ] {
        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (lo - o) * inv;
            let b = (hi - o) * inv;
            if a < b { (a, b) } else { (b, a) }
        };
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        // box entirely behind the ray
        return None;
    }
    Some(t_near.max(0.0))
}

/// Update the hovered node and report clicks.
pub fn update_picking(
    camera: Res<SceneCamera>,
    window: Res<WindowSize>,
    mut hover: ResMut<HoverState>,
    query: Query<(Entity, &SceneNode, &Transform3D, &MeshRenderer)>,
    rl: NonSend<RaylibHandle>,
    mut commands: Commands,
) {
    let cursor = rl.get_mouse_position();
    let (origin, direction) = mouse_ray(&camera, cursor.x, cursor.y, &window);

    let mut nearest: Option<(f32, Entity, String)> = None;
    for (entity, node, transform, mesh) in query.iter() {
        let half = mesh.half_extents() * transform.scale;
        let min = transform.position - half;
        let max = transform.position + half;
        if let Some(distance) = ray_hits_aabb(origin, direction, min, max) {
            if nearest.as_ref().is_none_or(|(best, _, _)| distance < *best) {
                nearest = Some((distance, entity, node.name.clone()));
            }
        }
    }

    hover.hovered = nearest.as_ref().map(|(_, entity, _)| *entity);

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        if let Some((_, entity, name)) = nearest {
            debug!("picked node '{name}'");
            commands.trigger(NodePickedEvent { entity, name });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> (Vector3, Vector3) {
        (Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn ray_straight_at_box_hits() {
        let (min, max) = unit_box();
        let hit = ray_hits_aabb(
            Vector3::new(0.0, 0.0, -5.0),
            Vector3::new(0.0, 0.0, 1.0),
            min,
            max,
        );
        assert!((hit.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_past_box_misses() {
        let (min, max) = unit_box();
        let hit = ray_hits_aabb(
            Vector3::new(0.0, 5.0, -5.0),
            Vector3::new(0.0, 0.0, 1.0),
            min,
            max,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn box_behind_ray_misses() {
        let (min, max) = unit_box();
        let hit = ray_hits_aabb(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(0.0, 0.0, 1.0),
            min,
            max,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn origin_inside_box_hits_at_zero() {
        let (min, max) = unit_box();
        let hit = ray_hits_aabb(
            Vector3::zero(),
            Vector3::new(0.0, 0.0, 1.0),
            min,
            max,
        );
        assert_eq!(hit, Some(0.0));
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = SceneCamera::new(16.0 / 9.0);
        let window = WindowSize { w: 1600, h: 900 };
        let (origin, direction) = mouse_ray(&camera, 800.0, 450.0, &window);
        let to_target = (camera.target - origin).normalized();
        assert!((direction - to_target).length() < 1e-4);
    }
}
