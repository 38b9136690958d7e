//! Session-persisted viewer state.
//!
//! The camera transform and a small set of feature toggles survive viewer
//! restarts through a JSON file. Missing or unreadable files fall back to
//! defaults; saving overwrites the whole record.

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Serializable camera transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

/// Feature toggles remembered across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionToggles {
    /// Show the loading overlay while assets resolve.
    pub loading_screen: bool,
    /// Log every asset outcome at info level instead of debug.
    pub resource_log: bool,
    /// Draw the ground grid in the 3D view.
    pub grid: bool,
}

impl Default for SessionToggles {
    fn default() -> Self {
        Self {
            loading_screen: true,
            resource_log: false,
            grid: true,
        }
    }
}

/// Per-session persisted state.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionState {
    /// Camera transform from the previous run, if any.
    pub camera: Option<CameraPose>,
    pub toggles: SessionToggles,
    /// Backing file; not part of the serialized record.
    #[serde(skip)]
    pub path: PathBuf,
}

impl SessionState {
    /// Load the session file, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut state = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<SessionState>(&json) {
                Ok(state) => {
                    info!("restored session from {}", path.display());
                    state
                }
                Err(e) => {
                    warn!("session file {} unreadable ({e}), using defaults", path.display());
                    SessionState::default()
                }
            },
            Err(_) => SessionState::default(),
        };
        state.path = path;
        state
    }

    /// Write the session file, creating parent directories as needed.
    pub fn save(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("failed to create session dir: {e}"))?;
            }
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize session: {e}"))?;
        std::fs::write(&self.path, json)
            .map_err(|e| format!("failed to write session {}: {e}", self.path.display()))
    }

    /// Delete the session file, ignoring a missing one.
    pub fn clear_file(path: impl Into<PathBuf>) {
        let path = path.into();
        match std::fs::remove_file(&path) {
            Ok(()) => info!("cleared session {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to clear session {}: {e}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vantage-session-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = temp_session_path("missing");
        let state = SessionState::load_or_default(&path);
        assert_eq!(state.camera, None);
        assert_eq!(state.toggles, SessionToggles::default());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let path = temp_session_path("roundtrip");
        let mut state = SessionState::load_or_default(&path);
        state.camera = Some(CameraPose {
            position: [1.0, 2.0, 3.0],
            target: [0.0, 0.5, 0.0],
        });
        state.toggles.grid = false;
        state.save().unwrap();

        let restored = SessionState::load_or_default(&path);
        assert_eq!(restored.camera, state.camera);
        assert!(!restored.toggles.grid);

        SessionState::clear_file(&path);
        let after_clear = SessionState::load_or_default(&path);
        assert_eq!(after_clear.camera, None);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = temp_session_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        let state = SessionState::load_or_default(&path);
        assert_eq!(state.camera, None);
        SessionState::clear_file(&path);
    }
}
