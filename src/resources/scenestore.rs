//! Scene registry.
//!
//! Scene setup systems and lifecycle hooks are registered under string keys
//! and looked up later to run via their [`SystemId`]. Scene names resolve
//! case-insensitively; an unknown or absent request falls back to the
//! default scene.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use log::warn;
use rustc_hash::FxHashMap;

/// Name of the scene used when no valid scene was requested.
pub const DEFAULT_SCENE: &str = "main";

/// Map of scene names to setup systems, plus lifecycle hooks and the
/// currently selected scene.
#[derive(Resource)]
pub struct SceneRegistry {
    scenes: FxHashMap<String, SystemId>,
    hooks: FxHashMap<String, SystemId>,
    active: String,
}

impl SceneRegistry {
    pub fn new() -> Self {
        SceneRegistry {
            scenes: FxHashMap::default(),
            hooks: FxHashMap::default(),
            active: DEFAULT_SCENE.to_string(),
        }
    }

    /// Register a scene setup system. Names are stored lower-cased.
    pub fn register_scene(&mut self, name: impl Into<String>, id: SystemId) {
        self.scenes.insert(name.into().to_lowercase(), id);
    }

    /// Register a lifecycle hook system under a well-known key.
    pub fn register_hook(&mut self, name: impl Into<String>, id: SystemId) {
        self.hooks.insert(name.into(), id);
    }

    /// Resolve a requested scene name case-insensitively, falling back to
    /// [`DEFAULT_SCENE`] when the request is absent or unknown.
    pub fn resolve(&self, requested: Option<&str>) -> String {
        match requested {
            Some(name) => {
                let lowered = name.to_lowercase();
                if self.scenes.contains_key(&lowered) {
                    lowered
                } else {
                    warn!("unknown scene '{name}', falling back to '{DEFAULT_SCENE}'");
                    DEFAULT_SCENE.to_string()
                }
            }
            None => DEFAULT_SCENE.to_string(),
        }
    }

    /// Select the active scene, resolving the request first.
    pub fn set_active(&mut self, requested: Option<&str>) {
        self.active = self.resolve(requested);
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Setup system of the active scene.
    pub fn active_scene_system(&self) -> Option<SystemId> {
        self.scenes.get(&self.active).copied()
    }

    /// Look up a lifecycle hook by key.
    pub fn hook(&self, name: &str) -> Option<&SystemId> {
        self.hooks.get(name)
    }

    /// Registered scene names, unordered.
    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
