//! Asset manifest.
//!
//! The manifest is an ordered list of tagged entries describing the assets a
//! scene wants loaded. Entries form a closed union over the supported asset
//! kinds; anything else in the JSON array is logged and dropped at parse
//! time, before the dispatched total is computed, so the loader's outcome
//! count always matches what was actually sent to the loader thread.
//!
//! # Manifest File Format
//!
//! ```json
//! [
//!   { "type": "model", "name": "foxModel", "path": "assets/models/fox.glb" },
//!   { "type": "texture", "name": "backdrop", "path": "assets/textures/env.png" },
//!   { "type": "cubeTexture", "name": "sky", "paths": ["px.png", "nx.png",
//!     "py.png", "ny.png", "pz.png", "nz.png"] },
//!   { "type": "audio", "name": "ambience", "path": "assets/audio/wind.ogg" }
//! ]
//! ```

use bevy_ecs::prelude::Resource;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::events::assets::LoaderCmd;

/// One asset the loader should fetch. Closed tagged union; each kind carries
/// only the fields it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AssetSource {
    Model { name: String, path: String },
    Texture { name: String, path: String },
    /// Six faces ordered +X, -X, +Y, -Y, +Z, -Z.
    CubeTexture { name: String, paths: [String; 6] },
    Audio { name: String, path: String },
}

impl AssetSource {
    /// Manifest key of this entry.
    pub fn name(&self) -> &str {
        match self {
            AssetSource::Model { name, .. }
            | AssetSource::Texture { name, .. }
            | AssetSource::CubeTexture { name, .. }
            | AssetSource::Audio { name, .. } => name,
        }
    }

    /// The loader command that fetches this entry.
    pub fn to_cmd(&self) -> LoaderCmd {
        match self {
            AssetSource::Model { name, path } => LoaderCmd::LoadModel {
                name: name.clone(),
                path: path.clone(),
            },
            AssetSource::Texture { name, path } => LoaderCmd::LoadTexture {
                name: name.clone(),
                path: path.clone(),
            },
            AssetSource::CubeTexture { name, paths } => LoaderCmd::LoadCubeTexture {
                name: name.clone(),
                paths: paths.clone(),
            },
            AssetSource::Audio { name, path } => LoaderCmd::LoadAudio {
                name: name.clone(),
                path: path.clone(),
            },
        }
    }
}

/// Ordered, validated list of asset sources. Immutable once loading starts.
#[derive(Resource, Debug, Clone, Default)]
pub struct Manifest {
    sources: Vec<AssetSource>,
}

impl Manifest {
    pub fn new(sources: Vec<AssetSource>) -> Self {
        Self { sources }
    }

    /// Parse a JSON array, skipping entries that do not match any known
    /// asset kind and entries whose name was already taken.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let values: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| format!("manifest is not a JSON array: {e}"))?;

        let mut sources: Vec<AssetSource> = Vec::with_capacity(values.len());
        for value in values {
            match serde_json::from_value::<AssetSource>(value) {
                Ok(source) => {
                    if sources.iter().any(|s| s.name() == source.name()) {
                        warn!("duplicate manifest name '{}', entry skipped", source.name());
                        continue;
                    }
                    sources.push(source);
                }
                Err(e) => {
                    error!("invalid manifest entry skipped: {e}");
                }
            }
        }
        Ok(Self { sources })
    }

    /// Read and parse a manifest file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read manifest {}: {e}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetSource> {
        self.sources.iter()
    }

    /// Look up an entry by name.
    pub fn find(&self, name: &str) -> Option<&AssetSource> {
        self.sources.iter().find(|s| s.name() == name)
    }

    /// Path of an audio entry, for the playback thread.
    pub fn audio_path(&self, name: &str) -> Option<&str> {
        match self.find(name) {
            Some(AssetSource::Audio { path, .. }) => Some(path),
            _ => None,
        }
    }

    /// Path of a model entry, for GPU upload.
    pub fn model_path(&self, name: &str) -> Option<&str> {
        match self.find(name) {
            Some(AssetSource::Model { path, .. }) => Some(path),
            _ => None,
        }
    }

    /// Path of a texture entry, for GPU upload.
    pub fn texture_path(&self, name: &str) -> Option<&str> {
        match self.find(name) {
            Some(AssetSource::Texture { path, .. }) => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_kinds() {
        let json = r#"[
            {"type": "model", "name": "fox", "path": "fox.glb"},
            {"type": "texture", "name": "env", "path": "env.png"},
            {"type": "cubeTexture", "name": "sky",
             "paths": ["a", "b", "c", "d", "e", "f"]},
            {"type": "audio", "name": "wind", "path": "wind.ogg"}
        ]"#;
        let manifest = Manifest::from_json_str(json).unwrap();
        assert_eq!(manifest.len(), 4);
        assert!(matches!(
            manifest.find("fox"),
            Some(AssetSource::Model { .. })
        ));
        assert_eq!(manifest.audio_path("wind"), Some("wind.ogg"));
        assert_eq!(manifest.audio_path("fox"), None);
    }

    #[test]
    fn unknown_kind_is_skipped_and_not_counted() {
        let json = r#"[
            {"type": "shader", "name": "glow", "path": "glow.frag"},
            {"type": "texture", "name": "env", "path": "env.png"}
        ]"#;
        let manifest = Manifest::from_json_str(json).unwrap();
        assert_eq!(manifest.len(), 1);
        assert!(manifest.find("glow").is_none());
    }

    #[test]
    fn duplicate_names_keep_first_entry() {
        let json = r#"[
            {"type": "texture", "name": "env", "path": "first.png"},
            {"type": "texture", "name": "env", "path": "second.png"}
        ]"#;
        let manifest = Manifest::from_json_str(json).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.texture_path("env"), Some("first.png"));
    }

    #[test]
    fn malformed_entry_does_not_poison_the_rest() {
        let json = r#"[
            {"type": "cubeTexture", "name": "sky", "paths": ["only", "three", "faces"]},
            {"type": "audio", "name": "wind", "path": "wind.ogg"}
        ]"#;
        let manifest = Manifest::from_json_str(json).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.audio_path("wind"), Some("wind.ogg"));
    }

    #[test]
    fn non_array_root_is_an_error() {
        assert!(Manifest::from_json_str(r#"{"type": "texture"}"#).is_err());
    }
}
