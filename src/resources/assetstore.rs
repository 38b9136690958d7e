//! Loaded asset store.
//!
//! Maps manifest names to opaque asset handles. The coordinator only moves
//! bytes; decoding and GPU upload belong to the consuming scene code, which
//! also has the manifest paths available when the platform API wants files
//! instead of buffers.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use std::fmt;

/// Raw loaded payload of one manifest entry.
#[derive(Clone)]
pub enum AssetHandle {
    Model { bytes: Vec<u8> },
    Texture { bytes: Vec<u8> },
    /// Six faces ordered +X, -X, +Y, -Y, +Z, -Z.
    CubeTexture { faces: Vec<Vec<u8>> },
    Audio { bytes: Vec<u8> },
}

impl fmt::Debug for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetHandle::Model { bytes } => write!(f, "Model({} bytes)", bytes.len()),
            AssetHandle::Texture { bytes } => write!(f, "Texture({} bytes)", bytes.len()),
            AssetHandle::CubeTexture { faces } => {
                write!(f, "CubeTexture({} faces)", faces.len())
            }
            AssetHandle::Audio { bytes } => write!(f, "Audio({} bytes)", bytes.len()),
        }
    }
}

/// Map of manifest name to loaded handle. Grows monotonically during a load
/// phase; cleared only at teardown.
#[derive(Resource, Debug, Default)]
pub struct AssetStore {
    items: FxHashMap<String, AssetHandle>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, handle: AssetHandle) {
        self.items.insert(name.into(), handle);
    }

    pub fn get(&self, name: &str) -> Option<&AssetHandle> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
