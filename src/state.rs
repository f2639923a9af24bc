//! Persisted library state.
//!
//! This is the shape the library round-trips between sessions: which
//! presentation-tree nodes were expanded, which scopes are configured, the
//! user metadata of files (keyed by file identifier) and the playlists (whose
//! members are file identifiers). It is stored as TOML next to the config file.

use crate::error::Result;
use crate::tree::SortMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryState {
    #[serde(default)]
    pub expanded: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub metadata: Vec<MetadataRecord>,
    #[serde(default)]
    pub playlists: Vec<PlaylistRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Category names joined with `", "`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub name: String,
    #[serde(default = "default_playlist_sort_mode")]
    pub sort_mode: SortMode,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub members: Vec<String>,
}

fn default_playlist_sort_mode() -> SortMode {
    SortMode::Name
}

impl LibraryState {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load state from `path`. A missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
