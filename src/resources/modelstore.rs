//! GPU model store.
//!
//! Non-send resource holding uploaded models keyed by manifest name.
//! Dropping an entry unloads the model's meshes and materials, which is how
//! teardown disposes per-node geometry.

use raylib::prelude::Model;
use rustc_hash::FxHashMap;

/// Map of names to uploaded models.
#[derive(Default)]
pub struct ModelStore {
    models: FxHashMap<String, Model>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, model: Model) {
        self.models.insert(name.into(), model);
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Remove one model, releasing its GPU resources.
    pub fn remove(&mut self, name: &str) -> bool {
        self.models.remove(name).is_some()
    }

    /// Release every model.
    pub fn clear(&mut self) {
        self.models.clear();
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
