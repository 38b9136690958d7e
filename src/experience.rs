//! Experience orchestrator.
//!
//! [`Experience`] is the explicitly constructed context that owns the ECS
//! world, the frame schedule and the scene-graph root. It is built once in
//! `main` and passed by reference; there is no global instance and no way
//! to reach one. Everything a subsystem needs arrives through the world's
//! resources.
//!
//! Construction order matters and is fixed here: clock and viewport
//! trackers first, session before the camera that re-applies it, stores
//! and the loader bridge before the scenes that consume them. The windowed
//! binary layers raylib handles and the windowed systems on top; headless
//! worlds (tests) run the same core untouched.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::components::meshrenderer::{MeshRenderer, MeshShape};
use crate::components::persistent::Persistent;
use crate::components::scenenode::SceneNode;
use crate::components::transform3d::Transform3D;
use crate::events::appstate::{AppStateChangedEvent, observe_appstate_change_event};
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::resize::{WindowResizedEvent, on_window_resized};
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::appconfig::AppConfig;
use crate::resources::appstate::{AppState, AppStates, NextAppState};
use crate::resources::assetstore::AssetStore;
use crate::resources::audio::shutdown_audio;
use crate::resources::camera::SceneCamera;
use crate::resources::debugmode::DebugMode;
use crate::resources::input::InputState;
use crate::resources::loader::{LoadProgress, setup_loader, shutdown_loader};
use crate::resources::manifest::Manifest;
use crate::resources::modelstore::ModelStore;
use crate::resources::picking::HoverState;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::scenestore::SceneRegistry;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::SessionState;
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldtime::WorldTime;
use crate::scenes::register_scenes;
use crate::systems::appstate::{check_pending_state, state_is_running};
use crate::systems::audio::{
    forward_audio_cmds, gesture_autoplay_observer, log_audio_messages, poll_audio_messages,
    update_audio_cmds, update_audio_messages,
};
use crate::systems::camera::orbit_camera_from_input;
use crate::systems::loader::{
    apply_asset_messages, begin_loading, on_resources_ready, poll_asset_messages,
    update_asset_messages,
};
use crate::systems::spin::rotate_spinners;
use crate::systems::time::update_world_time;

/// Entity at the top of the scene graph. Every scene node hangs off it via
/// `ChildOf`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneRoot(pub Entity);

/// Everything needed to construct an [`Experience`].
pub struct ExperienceOptions {
    pub config: AppConfig,
    pub manifest: Manifest,
    /// Requested scene name; resolved case-insensitively with a fallback.
    pub scene: Option<String>,
    /// Build the debug overlay and diagnostics. When false they do not
    /// exist at all, not merely hidden.
    pub debug: bool,
    /// Forget the persisted session before loading it.
    pub clear_session: bool,
}

impl Default for ExperienceOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::new(),
            manifest: Manifest::default(),
            scene: None,
            debug: false,
            clear_session: false,
        }
    }
}

/// Explicit owner of the world, schedule and scene-graph lifecycle.
pub struct Experience {
    pub world: World,
    pub schedule: Schedule,
    scene_root: Entity,
    destroyed: bool,
}

impl Experience {
    /// Build the world, kick off the asset load phase, and assemble the
    /// core frame schedule.
    pub fn new(options: ExperienceOptions) -> Self {
        let ExperienceOptions {
            config,
            manifest,
            scene,
            debug,
            clear_session,
        } = options;

        let mut world = World::new();

        // clock and viewport trackers first, the camera reads them
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(ScreenSize {
            w: config.render_width as i32,
            h: config.render_height as i32,
        });
        let window_size = WindowSize {
            w: config.window_width as i32,
            h: config.window_height as i32,
        };
        world.insert_resource(window_size);

        // session before the camera so the saved transform is re-applied
        if clear_session {
            SessionState::clear_file(&config.session_path);
        }
        let session = SessionState::load_or_default(&config.session_path);
        let mut camera = SceneCamera::new(window_size.aspect());
        if let Some(pose) = &session.camera {
            camera.apply_pose(pose);
        }
        world.insert_resource(camera);
        world.insert_resource(session);

        // scene graph root
        let scene_root = world
            .spawn((SceneNode::new("root"), Transform3D::default()))
            .id();
        world.insert_resource(SceneRoot(scene_root));

        // debug instrumentation exists only when asked for
        if debug {
            world.insert_resource(DebugMode {});
        }

        world.insert_resource(InputState::default());
        world.insert_resource(HoverState::default());

        // stores and the loader bridge before the scenes that consume them
        world.insert_resource(AssetStore::new());
        world.insert_resource(LoadProgress::default());
        setup_loader(&mut world);
        world.init_resource::<Messages<AudioCmd>>();
        world.init_resource::<Messages<AudioMessage>>();
        world.insert_resource(manifest);
        world.insert_resource(config);

        // lifecycle state machine
        world.insert_resource(AppState::new());
        world.insert_resource(NextAppState::new());

        // scene registry, lifecycle hooks, shipped scenes
        let mut registry = SceneRegistry::new();
        let begin_id = world.register_system(begin_loading);
        world.entity_mut(begin_id.entity()).insert(Persistent);
        registry.register_hook("begin_loading", begin_id);
        world.insert_resource(registry);
        register_scenes(&mut world);
        {
            let mut registry = world.resource_mut::<SceneRegistry>();
            registry.set_active(scene.as_deref());
            info!("active scene '{}'", registry.active());
        }

        world.spawn((Observer::new(observe_appstate_change_event), Persistent));
        world.spawn((Observer::new(on_resources_ready), Persistent));
        world.spawn((Observer::new(switch_debug_observer), Persistent));
        world.spawn((Observer::new(on_window_resized), Persistent));
        world.spawn((Observer::new(gesture_autoplay_observer), Persistent));
        world.flush();

        // enter Loading now; an empty manifest resolves to ready inside
        // this same flush
        {
            let mut next_state = world.resource_mut::<NextAppState>();
            next_state.set(AppStates::Loading);
        }
        world.trigger(AppStateChangedEvent {});
        world.flush();

        // core frame schedule: loader and audio bridges, state machine,
        // scene logic; the windowed binary appends input, picking, render
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                poll_asset_messages,
                update_asset_messages,
                apply_asset_messages,
            )
                .chain(),
        );
        schedule.add_systems(
            (
                update_audio_cmds,
                forward_audio_cmds,
                poll_audio_messages,
                update_audio_messages,
                log_audio_messages,
            )
                .chain(),
        );
        schedule.add_systems(check_pending_state);
        schedule.add_systems(rotate_spinners.run_if(state_is_running));
        schedule.add_systems(orbit_camera_from_input.run_if(state_is_running));
        schedule
            .initialize(&mut world)
            .expect("Failed to initialize schedule");

        Self {
            world,
            schedule,
            scene_root,
            destroyed: false,
        }
    }

    /// Root entity of the scene graph.
    pub fn scene_root(&self) -> Entity {
        self.scene_root
    }

    /// Whether [`destroy`](Self::destroy) already ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Advance one frame: clock, then the schedule in its fixed order,
    /// then change trackers.
    pub fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Record new window dimensions and notify the camera. The windowed
    /// per-frame tracker calls this path through the same event.
    pub fn resize(&mut self, width: i32, height: i32) {
        {
            let mut size = self.world.resource_mut::<WindowSize>();
            if size.w == width && size.h == height {
                return;
            }
            size.w = width;
            size.h = height;
        }
        self.world.trigger(WindowResizedEvent { width, height });
    }

    /// Idempotent teardown.
    ///
    /// Saves the session, walks the scene graph depth-first from the root
    /// visiting every node exactly once and releasing its GPU-side
    /// resources (nodes without any are skipped), despawns the graph, drops
    /// the renderer-level stores, and joins the background threads.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        // capture the camera transform into the session before teardown
        {
            let pose = self.world.resource::<SceneCamera>().pose();
            let mut session = self.world.resource_mut::<SessionState>();
            session.camera = Some(pose);
            if let Err(e) = session.save() {
                warn!("failed to save session: {e}");
            }
        }

        // child map from the ChildOf relationships, then a depth-first walk
        let mut children_of: FxHashMap<Entity, Vec<Entity>> = FxHashMap::default();
        {
            let mut query = self.world.query::<(Entity, &ChildOf)>();
            for (entity, child_of) in query.iter(&self.world) {
                children_of.entry(child_of.0).or_default().push(entity);
            }
        }

        let mut order = Vec::new();
        let mut stack = vec![self.scene_root];
        while let Some(entity) = stack.pop() {
            order.push(entity);
            if let Some(children) = children_of.get(&entity) {
                stack.extend(children.iter().copied());
            }
        }

        // release per-node GPU resources; nodes without any are skipped
        let model_keys: Vec<String> = order
            .iter()
            .filter_map(|entity| self.world.get::<MeshRenderer>(*entity))
            .filter_map(|mesh| match &mesh.shape {
                MeshShape::Model { model_key } => Some(model_key.clone()),
                _ => None,
            })
            .collect();
        if let Some(mut models) = self.world.get_non_send_resource_mut::<ModelStore>() {
            for key in &model_keys {
                models.remove(key);
            }
        }

        // children before parents, so the walk order is the despawn order
        for entity in order.iter().rev() {
            if self.world.entities().contains(*entity) {
                self.world.despawn(*entity);
            }
        }

        // renderer-level disposal, then the background threads
        drop(self.world.remove_non_send_resource::<TextureStore>());
        drop(self.world.remove_non_send_resource::<ModelStore>());
        drop(self.world.remove_non_send_resource::<RenderTarget>());
        self.world.resource_mut::<AssetStore>().clear();
        shutdown_audio(&mut self.world);
        shutdown_loader(&mut self.world);

        info!("experience destroyed");
    }
}
