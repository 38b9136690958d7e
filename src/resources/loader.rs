//! ECS resources that bridge the main thread with the background loader
//! thread, plus the load-phase progress state machine.
//!
//! Use [`setup_loader`] once during initialization to spawn the loader
//! thread and insert the [`LoaderBridge`] and `Messages<AssetMessage>`
//! resources. Call [`shutdown_loader`] during teardown to stop the thread.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::assets::{AssetMessage, LoaderCmd};
use crate::systems::loader::loader_thread;

/// Shared bridge between the ECS world and the loader thread.
///
/// Systems send commands via [`LoaderBridge::tx_cmd`] and poll outcomes via
/// [`LoaderBridge::rx_msg`].
#[derive(Resource)]
pub struct LoaderBridge {
    /// Sender for [`LoaderCmd`] (ECS -> loader thread).
    pub tx_cmd: Sender<LoaderCmd>,
    /// Receiver for [`AssetMessage`] (loader thread -> ECS).
    pub rx_msg: Receiver<AssetMessage>,
    /// Join handle for the background loader thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the loader thread and register bridge resources.
pub fn setup_loader(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<LoaderCmd>();
    let (tx_msg, rx_msg) = unbounded::<AssetMessage>();

    let handle = std::thread::spawn(move || loader_thread(rx_cmd, tx_msg));

    world.insert_resource(LoaderBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.init_resource::<Messages<AssetMessage>>();
}

/// Gracefully request shutdown of the loader thread and join it.
pub fn shutdown_loader(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<LoaderBridge>() {
        let _ = bridge.tx_cmd.send(LoaderCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}

/// Phase of the current load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Outcome counters for the current load phase.
///
/// Readiness is a reduction over a fixed-size set of outcomes: every
/// dispatched load resolves to loaded or failed, and the phase becomes
/// `Ready` exactly once when `loaded + failed == total`. The announce latch
/// keeps the ready event from ever firing twice.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LoadProgress {
    phase: LoadPhase,
    total: usize,
    loaded: usize,
    failed: usize,
    announced: bool,
}

impl LoadProgress {
    /// Start a load phase over `total` dispatched entries.
    pub fn begin(&mut self, total: usize) {
        self.phase = LoadPhase::Loading;
        self.total = total;
        self.loaded = 0;
        self.failed = 0;
        self.announced = false;
    }

    pub fn record_loaded(&mut self) {
        self.loaded += 1;
        debug_assert!(self.loaded + self.failed <= self.total);
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
        debug_assert!(self.loaded + self.failed <= self.total);
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    fn is_complete(&self) -> bool {
        self.loaded + self.failed == self.total
    }

    /// Transition to `Ready` and return true exactly once, when every
    /// outcome has arrived. All later calls return false.
    pub fn try_announce_ready(&mut self) -> bool {
        if self.phase == LoadPhase::Loading && self.is_complete() && !self.announced {
            self.phase = LoadPhase::Ready;
            self.announced = true;
            return true;
        }
        false
    }

    /// Fraction of outcomes observed, in `0.0..=1.0`. An empty phase counts
    /// as fully resolved.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            (self.loaded + self.failed) as f32 / self.total as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_phase_is_ready_immediately() {
        let mut progress = LoadProgress::default();
        progress.begin(0);
        assert!(progress.try_announce_ready());
        assert!(!progress.try_announce_ready());
        assert_eq!(progress.phase(), LoadPhase::Ready);
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn ready_fires_once_after_all_outcomes() {
        let mut progress = LoadProgress::default();
        progress.begin(3);
        progress.record_loaded();
        assert!(!progress.try_announce_ready());
        progress.record_failed();
        assert!(!progress.try_announce_ready());
        progress.record_loaded();
        assert!(progress.try_announce_ready());
        assert!(!progress.try_announce_ready());
        assert_eq!(progress.loaded(), 2);
        assert_eq!(progress.failed(), 1);
    }

    #[test]
    fn fraction_tracks_outcomes() {
        let mut progress = LoadProgress::default();
        progress.begin(4);
        assert_eq!(progress.fraction(), 0.0);
        progress.record_loaded();
        progress.record_failed();
        assert_eq!(progress.fraction(), 0.5);
    }

    #[test]
    fn begin_resets_the_announce_latch() {
        let mut progress = LoadProgress::default();
        progress.begin(0);
        assert!(progress.try_announce_ready());
        progress.begin(1);
        assert_eq!(progress.phase(), LoadPhase::Loading);
        progress.record_loaded();
        assert!(progress.try_announce_ready());
    }
}
