//! GPU texture store.
//!
//! Non-send resource holding uploaded textures keyed by manifest name.
//! Dropping an entry releases the GPU texture, which is how teardown
//! disposes per-node texture resources.
//!
//! Non-send because raylib textures must stay on the main thread; use
//! `NonSend<TextureStore>` / `NonSendMut<TextureStore>` in system params.

use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

/// Map of names to uploaded textures.
#[derive(Default)]
pub struct TextureStore {
    textures: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, texture: Texture2D) {
        self.textures.insert(name.into(), texture);
    }

    pub fn get(&self, name: &str) -> Option<&Texture2D> {
        self.textures.get(name)
    }

    /// Remove one texture, releasing its GPU memory.
    pub fn remove(&mut self, name: &str) -> bool {
        self.textures.remove(name).is_some()
    }

    /// Release every texture.
    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
