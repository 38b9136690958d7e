//! ECS resources that bridge the main thread with the background audio
//! thread.
//!
//! Use [`setup_audio`] once during windowed initialization to spawn the
//! audio thread and insert the [`AudioBridge`]. Call [`shutdown_audio`]
//! during teardown to stop the thread and release the audio device. The
//! headless core never sets the bridge up; audio systems tolerate its
//! absence.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;

/// Name of the looping track the main scene plays after the first gesture.
#[derive(Resource, Debug, Clone)]
pub struct AmbientTrack {
    pub name: String,
    pub path: String,
}

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread and register bridge resources.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Gracefully request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
