//! Frame rendering.
//!
//! Draws the scene into the fixed-resolution render target, scales it into
//! the window with letterboxing, and finishes with the overlays: the
//! loading bar while assets resolve, the debug readout last so it sits on
//! top of everything drawn this frame.
//!
//! Exclusive system: the raylib handles are taken out of the world for the
//! duration of the draw and put back afterwards.

use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::meshrenderer::{MeshRenderer, MeshShape};
use crate::components::scenenode::SceneNode;
use crate::components::transform3d::Transform3D;
use crate::resources::appstate::{AppState, AppStates};
use crate::resources::camera::SceneCamera;
use crate::resources::debugmode::DebugMode;
use crate::resources::loader::LoadProgress;
use crate::resources::modelstore::ModelStore;
use crate::resources::picking::HoverState;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::scenestore::SceneRegistry;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::SessionState;
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;

const CLEAR_COLOR: Color = Color {
    r: 24,
    g: 26,
    b: 36,
    a: 255,
};

/// Render one frame.
pub fn render_system(world: &mut World) {
    // scene data is collected up front; the GPU stores borrow the world
    // while drawing
    let draw_list: Vec<(Transform3D, MeshRenderer)> = {
        let mut query = world.query::<(&Transform3D, &MeshRenderer)>();
        query
            .iter(world)
            .map(|(transform, mesh)| (*transform, mesh.clone()))
            .collect()
    };
    let entity_count = world.entities().len();

    let scene_camera = *world.resource::<SceneCamera>();
    let camera = scene_camera.to_raylib();
    let window = *world.resource::<WindowSize>();
    let screen = *world.resource::<ScreenSize>();
    let progress = *world.resource::<LoadProgress>();
    let state = world.resource::<AppState>().get().clone();
    let toggles = world.resource::<SessionState>().toggles;
    let debug_active = world.contains_resource::<DebugMode>();
    let active_scene = world.resource::<SceneRegistry>().active().to_string();
    let hovered = world.resource::<HoverState>().hovered;
    let hovered_name = hovered
        .and_then(|entity| world.get::<SceneNode>(entity))
        .map(|node| node.name.clone());

    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let Some(mut target) = world.remove_non_send_resource::<RenderTarget>() else {
        world.insert_non_send_resource(rl);
        world.insert_non_send_resource(thread);
        return;
    };

    {
        let textures = world.get_non_send_resource::<TextureStore>();
        let models = world.get_non_send_resource::<ModelStore>();

        let mut d = rl.begin_drawing(&thread);
        {
            let mut dt = d.begin_texture_mode(&thread, &mut target.texture);
            dt.clear_background(CLEAR_COLOR);

            if let Some(backdrop) = textures.and_then(|t| t.get("backdrop")) {
                let src = Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: backdrop.width as f32,
                    height: backdrop.height as f32,
                };
                let dest = Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: target.render_width as f32,
                    height: target.render_height as f32,
                };
                dt.draw_texture_pro(backdrop, src, dest, Vector2::zero(), 0.0, Color::WHITE);
            }

            {
                let mut d3 = dt.begin_mode3D(camera);
                if toggles.grid {
                    d3.draw_grid(20, 1.0);
                }
                for (transform, mesh) in &draw_list {
                    draw_mesh(&mut d3, transform, mesh, models);
                }
            }

            if matches!(state, AppStates::Loading) && toggles.loading_screen {
                draw_loading_overlay(
                    &mut dt,
                    target.render_width,
                    target.render_height,
                    progress.fraction(),
                );
            }
        }

        // scale into the window, bars where aspects differ
        d.clear_background(Color::BLACK);
        let dest = window.calculate_letterbox(target.render_width, target.render_height);
        target.blit(&mut d, dest);

        // instrumentation draws last so frame state is already visible
        if debug_active {
            let fps = d.get_fps();
            d.draw_text(
                &format!("DEBUG (F11) | {:?} | FPS: {}", state, fps),
                10,
                10,
                10,
                Color::GREEN,
            );
            d.draw_text(
                &format!(
                    "Scene: {} | Entities: {} | {}x{} @ {}x{}",
                    active_scene, entity_count, screen.w, screen.h, window.w, window.h
                ),
                10,
                25,
                10,
                Color::GREEN,
            );
            d.draw_text(
                &format!(
                    "Camera: ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})",
                    scene_camera.position.x,
                    scene_camera.position.y,
                    scene_camera.position.z,
                    scene_camera.target.x,
                    scene_camera.target.y,
                    scene_camera.target.z
                ),
                10,
                40,
                10,
                Color::GREEN,
            );
            d.draw_text(
                &format!(
                    "Assets: {}/{} ({} failed)",
                    progress.loaded() + progress.failed(),
                    progress.total(),
                    progress.failed()
                ),
                10,
                55,
                10,
                Color::GREEN,
            );
            if let Some(name) = &hovered_name {
                d.draw_text(&format!("Hover: {}", name), 10, 70, 10, Color::YELLOW);
            }
        }
    }

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(target);
}

fn draw_mesh(
    d3: &mut impl RaylibDraw3D,
    transform: &Transform3D,
    mesh: &MeshRenderer,
    models: Option<&ModelStore>,
) {
    match &mesh.shape {
        MeshShape::Cube { size } => {
            let scaled = Vector3::new(
                size.x * transform.scale,
                size.y * transform.scale,
                size.z * transform.scale,
            );
            // model matrix for the yaw; draw_cube has no rotation parameter
            unsafe {
                ffi::rlPushMatrix();
                ffi::rlTranslatef(
                    transform.position.x,
                    transform.position.y,
                    transform.position.z,
                );
                ffi::rlRotatef(transform.yaw_degrees, 0.0, 1.0, 0.0);
            }
            d3.draw_cube(Vector3::zero(), scaled.x, scaled.y, scaled.z, mesh.tint);
            d3.draw_cube_wires(
                Vector3::zero(),
                scaled.x,
                scaled.y,
                scaled.z,
                wire_color(mesh.tint),
            );
            unsafe {
                ffi::rlPopMatrix();
            }
        }
        MeshShape::Plane { width, depth } => {
            d3.draw_plane(
                transform.position,
                Vector2::new(width * transform.scale, depth * transform.scale),
                mesh.tint,
            );
        }
        MeshShape::Model { model_key } => {
            if let Some(model) = models.and_then(|m| m.get(model_key)) {
                d3.draw_model_ex(
                    model,
                    transform.position,
                    Vector3::new(0.0, 1.0, 0.0),
                    transform.yaw_degrees,
                    Vector3::new(transform.scale, transform.scale, transform.scale),
                    mesh.tint,
                );
            }
        }
    }
}

fn wire_color(tint: Color) -> Color {
    Color::new(tint.r / 2, tint.g / 2, tint.b / 2, tint.a)
}

fn draw_loading_overlay(d: &mut impl RaylibDraw, width: u32, height: u32, fraction: f32) {
    let w = width as i32;
    let h = height as i32;
    d.draw_rectangle(0, 0, w, h, Color::BLACK);

    let bar_w = w / 2;
    let x = w / 4;
    let y = h / 2;
    d.draw_rectangle(x, y - 2, (bar_w as f32 * fraction) as i32, 4, Color::WHITE);
    d.draw_rectangle_lines(x, y - 2, bar_w, 4, Color::DARKGRAY);
}
