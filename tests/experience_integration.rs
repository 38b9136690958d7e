//! Integration tests for the experience orchestrator: construction order,
//! scene selection, lifecycle, resize propagation, session persistence and
//! teardown. Everything here runs headless; no window is ever created.

use std::sync::atomic::{AtomicUsize, Ordering};

use bevy_ecs::prelude::*;

use vantageengine::components::scenenode::SceneNode;
use vantageengine::components::spin::Spin;
use vantageengine::components::transform3d::Transform3D;
use vantageengine::experience::{Experience, ExperienceOptions, SceneRoot};
use vantageengine::resources::appconfig::AppConfig;
use vantageengine::resources::appstate::{AppState, AppStates};
use vantageengine::resources::camera::SceneCamera;
use vantageengine::resources::loader::{LoadPhase, LoadProgress};
use vantageengine::resources::manifest::Manifest;
use vantageengine::resources::scenestore::SceneRegistry;
use vantageengine::resources::session::SessionState;
use vantageengine::resources::windowsize::WindowSize;

static SESSION_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn test_config() -> AppConfig {
    let n = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut config = AppConfig::new();
    config.session_path = std::env::temp_dir().join(format!(
        "vantage-exp-test-session-{}-{}.json",
        std::process::id(),
        n
    ));
    config
}

fn options(scene: Option<&str>) -> ExperienceOptions {
    ExperienceOptions {
        config: test_config(),
        manifest: Manifest::default(),
        scene: scene.map(String::from),
        debug: false,
        clear_session: true,
    }
}

/// Tick until the app reaches `Running`; an empty manifest needs only the
/// state machine to catch up.
fn run_until_running(experience: &mut Experience) {
    for _ in 0..10 {
        experience.update(1.0 / 60.0);
        if matches!(
            experience.world.resource::<AppState>().get(),
            AppStates::Running
        ) {
            return;
        }
    }
    panic!("experience never reached Running");
}

fn scene_node_names(experience: &mut Experience) -> Vec<String> {
    let mut query = experience.world.query::<&SceneNode>();
    query
        .iter(&experience.world)
        .map(|node| node.name.clone())
        .collect()
}

#[test]
fn empty_manifest_resolves_during_construction() {
    let mut experience = Experience::new(options(None));
    // the load phase resolved inside the constructor, before any frame
    assert_eq!(
        experience.world.resource::<LoadProgress>().phase(),
        LoadPhase::Ready
    );
    experience.destroy();
}

#[test]
fn reaches_running_and_builds_the_default_scene() {
    let mut experience = Experience::new(options(None));
    run_until_running(&mut experience);

    let names = scene_node_names(&mut experience);
    assert!(names.iter().any(|n| n == "root"));
    assert!(names.iter().any(|n| n == "floor"));
    // twelve scattered cubes
    assert_eq!(names.iter().filter(|n| n.starts_with("cube")).count(), 12);
    // no fox without assets
    assert!(!names.iter().any(|n| n == "fox"));

    experience.destroy();
}

#[test]
fn scene_request_resolves_case_insensitively() {
    let mut experience = Experience::new(options(Some("Main")));
    assert_eq!(experience.world.resource::<SceneRegistry>().active(), "main");
    experience.destroy();

    let mut experience = Experience::new(options(Some("SingleCube")));
    assert_eq!(
        experience.world.resource::<SceneRegistry>().active(),
        "singlecube"
    );
    run_until_running(&mut experience);
    let names = scene_node_names(&mut experience);
    assert!(names.iter().any(|n| n == "cube"));
    assert!(!names.iter().any(|n| n == "floor"));
    experience.destroy();
}

#[test]
fn unknown_scene_falls_back_to_main() {
    let mut experience = Experience::new(options(Some("doesnotexist")));
    assert_eq!(experience.world.resource::<SceneRegistry>().active(), "main");
    experience.destroy();
}

#[test]
fn single_root_node_is_built_per_construction() {
    let mut experience = Experience::new(options(None));
    let names = scene_node_names(&mut experience);
    assert_eq!(names.iter().filter(|n| *n == "root").count(), 1);

    let root = experience.world.resource::<SceneRoot>().0;
    assert_eq!(root, experience.scene_root());
    experience.destroy();
}

#[test]
fn spinners_advance_only_while_running() {
    let mut experience = Experience::new(options(Some("singlecube")));
    run_until_running(&mut experience);

    let yaw_before = {
        let mut query = experience.world.query::<(&Spin, &Transform3D)>();
        let (_, transform) = query.single(&experience.world).expect("one spinner");
        transform.yaw_degrees
    };
    experience.update(0.5);
    let yaw_after = {
        let mut query = experience.world.query::<(&Spin, &Transform3D)>();
        let (_, transform) = query.single(&experience.world).expect("one spinner");
        transform.yaw_degrees
    };
    assert!(
        (yaw_after - yaw_before).abs() > 1.0,
        "spinner did not rotate: {yaw_before} -> {yaw_after}"
    );

    experience.destroy();
}

#[test]
fn held_actions_orbit_the_camera() {
    use raylib::prelude::KeyboardKey;
    use vantageengine::resources::input::InputState;

    let mut experience = Experience::new(options(None));
    run_until_running(&mut experience);

    let before = experience.world.resource::<SceneCamera>().position;
    experience
        .world
        .resource_mut::<InputState>()
        .apply_key(KeyboardKey::KEY_RIGHT, true);
    experience.update(0.25);
    let after = experience.world.resource::<SceneCamera>().position;

    assert!(
        (after - before).length() > 0.01,
        "camera did not orbit on held input"
    );

    experience.destroy();
}

#[test]
fn resize_forwards_the_new_aspect_to_the_camera() {
    let mut experience = Experience::new(options(None));
    experience.resize(800, 400);

    assert_eq!(
        *experience.world.resource::<WindowSize>(),
        WindowSize { w: 800, h: 400 }
    );
    let aspect = experience.world.resource::<SceneCamera>().aspect;
    assert!((aspect - 2.0).abs() < 1e-4);

    experience.destroy();
}

#[test]
fn destroy_with_zero_mesh_nodes_completes_and_is_idempotent() {
    let mut experience = Experience::new(options(None));
    // destroy before any update: the scene graph holds only the bare root
    experience.destroy();
    assert!(experience.is_destroyed());

    // further calls and frames are no-ops
    experience.destroy();
    experience.update(1.0 / 60.0);

    let session_path = experience
        .world
        .resource::<SessionState>()
        .path
        .clone();
    let _ = std::fs::remove_file(session_path);
}

#[test]
fn destroy_despawns_the_scene_graph() {
    let mut experience = Experience::new(options(None));
    run_until_running(&mut experience);
    assert!(!scene_node_names(&mut experience).is_empty());

    experience.destroy();
    assert!(scene_node_names(&mut experience).is_empty());
}

#[test]
fn camera_transform_survives_across_sessions() {
    let mut first = Experience::new(options(None));
    let session_path = first.world.resource::<SessionState>().path.clone();
    run_until_running(&mut first);

    {
        let mut camera = first.world.resource_mut::<SceneCamera>();
        camera.orbit(90.0, 15.0);
    }
    let saved_position = first.world.resource::<SceneCamera>().position;
    first.destroy();

    // same session file, no clear: the pose comes back
    let mut config = AppConfig::new();
    config.session_path = session_path.clone();
    let mut second = Experience::new(ExperienceOptions {
        config,
        manifest: Manifest::default(),
        scene: None,
        debug: false,
        clear_session: false,
    });
    let restored_position = second.world.resource::<SceneCamera>().position;
    assert!((restored_position - saved_position).length() < 1e-4);

    second.destroy();
    let _ = std::fs::remove_file(session_path);
}

#[test]
fn debug_mode_is_only_built_when_requested() {
    use vantageengine::resources::debugmode::DebugMode;

    let mut experience = Experience::new(options(None));
    assert!(!experience.world.contains_resource::<DebugMode>());
    experience.destroy();

    let mut experience = Experience::new(ExperienceOptions {
        debug: true,
        ..options(None)
    });
    assert!(experience.world.contains_resource::<DebugMode>());
    experience.destroy();
}
