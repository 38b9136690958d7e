//! Shipped scenes.
//!
//! Scene setup systems run once, as the enter hook of the `Running` state,
//! after the asset phase resolved. They spawn scene-graph nodes under the
//! root and, when a window exists, upload arrived assets to the GPU stores.
//! Headless worlds get the same node graph with no uploads.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::{Color, RaylibHandle, RaylibThread, Vector3};

use crate::components::meshrenderer::MeshRenderer;
use crate::components::persistent::Persistent;
use crate::components::scenenode::SceneNode;
use crate::components::spin::Spin;
use crate::components::transform3d::Transform3D;
use crate::experience::SceneRoot;
use crate::resources::assetstore::AssetStore;
use crate::resources::audio::AmbientTrack;
use crate::resources::manifest::Manifest;
use crate::resources::modelstore::ModelStore;
use crate::resources::scenestore::SceneRegistry;
use crate::resources::texturestore::TextureStore;

const CUBE_COUNT: usize = 12;
const CUBE_PALETTE: [Color; 6] = [
    Color::SKYBLUE,
    Color::GOLD,
    Color::ORANGE,
    Color::PINK,
    Color::LIME,
    Color::VIOLET,
];

/// Register every shipped scene's setup system in the registry.
///
/// System entities are marked [`Persistent`] so scene-graph teardown leaves
/// them intact.
pub fn register_scenes(world: &mut World) {
    let main_id = world.register_system(setup_main_scene);
    world.entity_mut(main_id.entity()).insert(Persistent);

    let cube_id = world.register_system(setup_single_cube_scene);
    world.entity_mut(cube_id.entity()).insert(Persistent);

    let mut registry = world.resource_mut::<SceneRegistry>();
    registry.register_scene("main", main_id);
    registry.register_scene("singlecube", cube_id);
}

/// Default scene: floor, textured backdrop, fox model, scattered spinning
/// cubes, ambient audio armed behind the first-gesture gate.
pub fn setup_main_scene(
    mut commands: Commands,
    root: Res<SceneRoot>,
    assets: Res<AssetStore>,
    manifest: Res<Manifest>,
    rl: Option<NonSendMut<RaylibHandle>>,
    thread: Option<NonSend<RaylibThread>>,
    textures: Option<NonSendMut<TextureStore>>,
    models: Option<NonSendMut<ModelStore>>,
) {
    info!("building scene 'main'");

    commands.spawn((
        SceneNode::new("floor"),
        Transform3D::default(),
        MeshRenderer::plane(20.0, 20.0, Color::new(92, 104, 82, 255)),
        ChildOf(root.0),
    ));

    if assets.contains("foxModel") {
        commands.spawn((
            SceneNode::new("fox"),
            Transform3D {
                position: Vector3::new(2.0, 0.0, -1.5),
                yaw_degrees: -30.0,
                scale: 0.025,
            },
            MeshRenderer::model("foxModel", Color::WHITE),
            ChildOf(root.0),
        ));
    }

    let mut rng = fastrand::Rng::new();
    for i in 0..CUBE_COUNT {
        let angle = (i as f32 / CUBE_COUNT as f32) * std::f32::consts::TAU
            + rng.f32() * 0.4;
        let radius = 4.0 + rng.f32() * 3.0;
        let side = 0.4 + rng.f32() * 0.7;
        commands.spawn((
            SceneNode::new(format!("cube{i}")),
            Transform3D {
                position: Vector3::new(
                    radius * angle.cos(),
                    side * 0.5,
                    radius * angle.sin(),
                ),
                yaw_degrees: rng.f32() * 360.0,
                scale: 1.0,
            },
            MeshRenderer::cube(
                Vector3::new(side, side, side),
                CUBE_PALETTE[rng.usize(..CUBE_PALETTE.len())],
            ),
            Spin {
                speed: 20.0 + rng.f32() * 70.0,
            },
            ChildOf(root.0),
        ));
    }

    if assets.contains("ambience") {
        if let Some(path) = manifest.audio_path("ambience") {
            commands.insert_resource(AmbientTrack {
                name: "ambience".to_string(),
                path: path.to_string(),
            });
        }
    }

    upload_scene_assets(&assets, &manifest, rl, thread, textures, models);
}

/// Minimal scene: one spinning cube over the grid.
pub fn setup_single_cube_scene(mut commands: Commands, root: Res<SceneRoot>) {
    info!("building scene 'singlecube'");

    commands.spawn((
        SceneNode::new("cube"),
        Transform3D::from_position(0.0, 0.75, 0.0),
        MeshRenderer::cube(Vector3::new(1.5, 1.5, 1.5), Color::GOLD),
        Spin { speed: 45.0 },
        ChildOf(root.0),
    ));
}

/// Upload arrived assets to the GPU stores. No-op in a headless world.
///
/// Raylib wants files for models and textures, so the upload goes through
/// the manifest paths; the raw bytes in the asset store stay the canonical
/// record of what arrived.
fn upload_scene_assets(
    assets: &AssetStore,
    manifest: &Manifest,
    rl: Option<NonSendMut<RaylibHandle>>,
    thread: Option<NonSend<RaylibThread>>,
    textures: Option<NonSendMut<TextureStore>>,
    models: Option<NonSendMut<ModelStore>>,
) {
    let (Some(mut rl), Some(thread), Some(mut textures), Some(mut models)) =
        (rl, thread, textures, models)
    else {
        return;
    };

    if assets.contains("backdrop") {
        if let Some(path) = manifest.texture_path("backdrop") {
            match rl.load_texture(&thread, path) {
                Ok(texture) => textures.insert("backdrop", texture),
                Err(e) => warn!("backdrop upload failed: {e}"),
            }
        }
    }

    if assets.contains("foxModel") {
        if let Some(path) = manifest.model_path("foxModel") {
            match rl.load_model(&thread, path) {
                Ok(model) => models.insert("foxModel", model),
                Err(e) => warn!("fox model upload failed: {e}"),
            }
        }
    }
}
