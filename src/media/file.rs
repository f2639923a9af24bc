//! A single file discovered under a scope.

use super::category::{self, Category};
use super::kind::MediaKind;
use crate::constants::IDENTIFIER_SEPARATOR;
use crate::error::Result;
use crate::identifier::identifier_of;
use crate::tree::{DirId, MediaDirectory};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug)]
pub struct MediaFile {
    name: String,
    kind: MediaKind,
    location: PathBuf,
    location_key: String,
    modified: SystemTime,
    parent: DirId,
    identifier: String,
    pub comment: String,
    pub image: Option<String>,
    pub categories: Vec<Arc<Category>>,
}

impl MediaFile {
    /// Build a file entity owned by `parent`, reading its modification time
    /// from the filesystem.
    pub fn open(location: impl AsRef<Path>, parent: &MediaDirectory) -> Result<Self> {
        let location = location.as_ref();
        let modified = fs::metadata(location)?.modified().unwrap_or(UNIX_EPOCH);
        Ok(Self::new(location.to_path_buf(), modified, parent))
    }

    /// Build a file entity from metadata the caller already read.
    pub fn new(location: PathBuf, modified: SystemTime, parent: &MediaDirectory) -> Self {
        let location_key = location_key(&location);
        let name = location
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = MediaKind::of_path(&location);
        let identifier = format!(
            "{}{}{}",
            parent.identifier(),
            IDENTIFIER_SEPARATOR,
            identifier_of(&location_key)
        );

        Self {
            name,
            kind,
            location,
            location_key,
            modified,
            parent: parent.id(),
            identifier,
            comment: String::new(),
            image: None,
            categories: Vec::new(),
        }
    }

    /// File name without its extension
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Location as a string with `/` separators, the form identifiers hash
    pub fn location_key(&self) -> &str {
        &self.location_key
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    pub(crate) fn set_modified(&mut self, modified: SystemTime) {
        self.modified = modified;
    }

    pub fn parent(&self) -> DirId {
        self.parent
    }

    /// Stable identifier, derived from the parent's identifier and this
    /// file's location
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn categories_as_text(&self) -> String {
        category::join_names(&self.categories)
    }

    /// Whether any user metadata is set
    pub fn has_metadata(&self) -> bool {
        !self.comment.is_empty() || self.image.is_some() || !self.categories.is_empty()
    }
}

/// Normalize a location into the `/`-separated string used for matching and
/// identifier derivation.
pub fn location_key(location: &Path) -> String {
    location.to_string_lossy().replace('\\', "/")
}
