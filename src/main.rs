//! Vantage Engine main entry point.
//!
//! A small 3D scene viewer written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! The binary opens the window, constructs the [`Experience`] context, and
//! runs the frame loop. Assets described by a JSON manifest are loaded on a
//! background thread; the scene is built once every load has resolved.
//!
//! # Main Loop
//!
//! 1. Parse the CLI, load `config.ini`, parse the asset manifest
//! 2. Initialize the raylib window and render target
//! 3. Construct the experience (world, loader thread, scene registry) and
//!    attach the windowed systems (input, resize tracking, picking, render)
//! 4. Run the frame loop until the window closes or a quit is requested
//! 5. Tear down: save the session, dispose the scene graph, join threads
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --scene main --debug
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod experience;
mod resources;
mod scenes;
mod systems;

use bevy_ecs::schedule::IntoScheduleConfigs;
use clap::Parser;
use log::warn;
use raylib::prelude::RaylibHandle;
use std::path::PathBuf;

use crate::experience::{Experience, ExperienceOptions};
use crate::resources::appconfig::AppConfig;
use crate::resources::appstate::{AppState, AppStates};
use crate::resources::audio::setup_audio;
use crate::resources::manifest::Manifest;
use crate::resources::modelstore::ModelStore;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::texturestore::TextureStore;
use crate::systems::camera::orbit_camera_from_input;
use crate::systems::input::update_input_state;
use crate::systems::picking::update_picking;
use crate::systems::render::render_system;
use crate::systems::resize::track_window_size;
use crate::systems::spin::rotate_spinners;

/// Vantage Engine 3D scene viewer
#[derive(Parser)]
#[command(version, about = "Vantage Engine - a small 3D scene viewer")]
struct Cli {
    /// Scene to open (case-insensitive). Unknown names fall back to "main".
    #[arg(long, value_name = "NAME")]
    scene: Option<String>,

    /// Build the debug overlay and extra diagnostics.
    #[arg(long)]
    debug: bool,

    /// Path to the configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the asset manifest, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Forget the persisted camera transform and feature toggles.
    #[arg(long)]
    clear_session: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::with_path(path),
        None => AppConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults

    let manifest_path = cli
        .manifest
        .clone()
        .unwrap_or_else(|| config.manifest_path.clone());
    let manifest = match Manifest::from_file(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!("{e}; starting with an empty manifest");
            Manifest::default()
        }
    };

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Vantage Engine");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Esc goes through the state machine instead of killing the window
    rl.set_exit_key(None);

    let render_target =
        RenderTarget::new(&mut rl, &thread, config.render_width, config.render_height)
            .expect("Failed to create render target");

    // --------------- Experience + windowed layer ---------------
    let mut experience = Experience::new(ExperienceOptions {
        config,
        manifest,
        scene: cli.scene,
        debug: cli.debug,
        clear_session: cli.clear_session,
    });

    experience.world.insert_non_send_resource(render_target);
    experience
        .world
        .insert_non_send_resource(TextureStore::new());
    experience.world.insert_non_send_resource(ModelStore::new());
    setup_audio(&mut experience.world);
    experience.world.insert_non_send_resource(rl);
    experience.world.insert_non_send_resource(thread);

    // windowed systems join the core schedule; scene logic stays ahead of
    // render submission, the debug overlay draws inside render, last
    experience.schedule.add_systems((
        update_input_state,
        track_window_size,
        update_picking.after(update_input_state),
        render_system
            .after(update_picking)
            .after(rotate_spinners)
            .after(orbit_camera_from_input),
    ));

    // --------------- Main loop ---------------
    while !experience
        .world
        .non_send_resource::<RaylibHandle>()
        .window_should_close()
        && !matches!(
            experience.world.resource::<AppState>().get(),
            AppStates::Quitting
        )
    {
        let dt = experience
            .world
            .non_send_resource::<RaylibHandle>()
            .get_frame_time();
        experience.update(dt);
    }

    experience.destroy();
}
