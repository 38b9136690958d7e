//! Audio playback backed by a dedicated thread and raylib.
//!
//! This module hosts the background audio thread and the systems that
//! bridge it with the ECS world:
//! - [`audio_thread`] owns the raylib audio device, lazily loads music
//!   streams on first play and caches them by name, and pumps the streams
//!   while they play.
//! - [`forward_audio_cmds`] relays ECS [`AudioCmd`] messages to the thread.
//! - [`poll_audio_messages`] / [`update_audio_messages`] drain and advance
//!   the reply queue each frame.
//! - [`gesture_autoplay_observer`] starts the ambient track on the first
//!   user gesture, the autoplay gate.
//!
//! All raylib audio calls stay on the one thread; the world communicates
//! through lock-free channels only.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::input::FirstGestureEvent;
use crate::resources::audio::{AmbientTrack, AudioBridge};

/// Drain pending replies from the audio thread into the ECS message queue.
pub fn poll_audio_messages(
    bridge: Option<Res<AudioBridge>>,
    mut writer: MessageWriter<AudioMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_audio_messages(mut messages: ResMut<Messages<AudioMessage>>) {
    messages.update();
}

/// Forward ECS [`AudioCmd`] messages to the audio thread.
pub fn forward_audio_cmds(
    bridge: Option<Res<AudioBridge>>,
    mut reader: MessageReader<AudioCmd>,
) {
    let Some(bridge) = bridge else {
        reader.read().for_each(drop);
        return;
    };
    for cmd in reader.read() {
        // ignore send errors during shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_audio_cmds(mut messages: ResMut<Messages<AudioCmd>>) {
    messages.update();
}

/// Log playback state changes coming back from the audio thread.
pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for message in reader.read() {
        match message {
            AudioMessage::Started { name } => debug!("audio started '{name}'"),
            AudioMessage::Stopped { name } => debug!("audio stopped '{name}'"),
            AudioMessage::Finished { name } => debug!("audio finished '{name}'"),
            AudioMessage::PlayFailed { name, error } => {
                warn!("audio play failed '{name}': {error}")
            }
        }
    }
}

/// Observer: the first user gesture unlocks ambient playback.
pub fn gesture_autoplay_observer(
    _trigger: On<FirstGestureEvent>,
    ambient: Option<Res<AmbientTrack>>,
    mut writer: MessageWriter<AudioCmd>,
) {
    if let Some(track) = ambient {
        info!("first gesture, starting ambient track '{}'", track.name);
        writer.write(AudioCmd::Play {
            name: track.name.clone(),
            path: track.path.clone(),
            looped: true,
            volume: 0.5,
        });
    }
}

/// Entry point of the dedicated audio thread.
///
/// Streams are loaded lazily on first [`AudioCmd::Play`] and cached by
/// name. While playing, streams are pumped every loop iteration; a
/// non-looping stream that reaches its end emits
/// [`AudioMessage::Finished`] once. If the audio device cannot be
/// initialized the thread degrades to answering every play with
/// [`AudioMessage::PlayFailed`] until shutdown, keeping the rest of the
/// viewer alive.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("audio device unavailable: {e}");
            for cmd in rx_cmd.iter() {
                match cmd {
                    AudioCmd::Play { name, .. } => {
                        let _ = tx_msg.send(AudioMessage::PlayFailed {
                            name,
                            error: "no audio device".into(),
                        });
                    }
                    AudioCmd::Shutdown => break,
                    _ => {}
                }
            }
            return;
        }
    };

    debug!("audio thread starting (id={:?})", std::thread::current().id());

    let mut streams: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::Play {
                    name,
                    path,
                    looped: want_loop,
                    volume,
                } => {
                    if !streams.contains_key(&name) {
                        match audio.new_music(&path) {
                            Ok(music) => {
                                debug!("[audio] loaded '{}' from '{}'", name, path);
                                streams.insert(name.clone(), music);
                            }
                            Err(e) => {
                                let _ = tx_msg.send(AudioMessage::PlayFailed {
                                    name,
                                    error: e.to_string(),
                                });
                                continue;
                            }
                        }
                    }
                    if let Some(music) = streams.get(&name) {
                        music.set_volume(volume);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(name.clone());
                        if want_loop {
                            looped.insert(name.clone());
                        } else {
                            looped.remove(&name);
                        }
                        let _ = tx_msg.send(AudioMessage::Started { name });
                    }
                }
                AudioCmd::Stop { name } => {
                    if let Some(music) = streams.get(&name) {
                        music.stop_stream();
                        playing.remove(&name);
                        looped.remove(&name);
                        let _ = tx_msg.send(AudioMessage::Stopped { name });
                    }
                }
                AudioCmd::StopAll => {
                    for (name, music) in streams.iter() {
                        if playing.contains(name) {
                            music.stop_stream();
                            let _ = tx_msg.send(AudioMessage::Stopped { name: name.clone() });
                        }
                    }
                    playing.clear();
                    looped.clear();
                }
                AudioCmd::Shutdown => break 'run,
            }
        }

        // pump streaming and detect natural ends
        let mut ended: Vec<String> = Vec::new();
        for name in playing.iter() {
            if let Some(music) = streams.get(name) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else {
                    let len = music.get_time_length();
                    let played = music.get_time_played();
                    if played >= len - 0.01 {
                        ended.push(name.clone());
                    }
                }
            }
        }
        for name in ended {
            if looped.contains(&name) {
                if let Some(music) = streams.get(&name) {
                    music.seek_stream(0.0);
                    music.play_stream();
                }
            } else {
                playing.remove(&name);
                let _ = tx_msg.send(AudioMessage::Finished { name });
            }
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    debug!("audio thread exiting (id={:?})", std::thread::current().id());

    // streams drop before `audio`, keeping device teardown ordered
}
