//! A directory node within a media tree.

use super::sort::SortMode;
use super::{DirId, FileId};
use crate::identifier::identifier_of;
use crate::media::file::location_key;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct MediaDirectory {
    id: DirId,
    name: String,
    location: PathBuf,
    location_key: String,
    identifier: String,
    parent: Option<DirId>,
    pub(super) directories: Vec<DirId>,
    pub(super) files: Vec<FileId>,
    /// Files in the order the last listing returned them
    pub(super) discovered: Vec<FileId>,
    pub(super) sort_mode: SortMode,
    pub(super) reverse: bool,
}

impl MediaDirectory {
    pub(super) fn new(id: DirId, location: PathBuf, parent: Option<DirId>) -> Self {
        let location_key = location_key(&location);
        let name = location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| location_key.clone());
        let identifier = identifier_of(&location_key);

        Self {
            id,
            name,
            location,
            location_key,
            identifier,
            parent,
            directories: Vec::new(),
            files: Vec::new(),
            discovered: Vec::new(),
            sort_mode: SortMode::None,
            reverse: false,
        }
    }

    pub fn id(&self) -> DirId {
        self.id
    }

    /// Last component of the location
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn location_key(&self) -> &str {
        &self.location_key
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// `None` for a scope root
    pub fn parent(&self) -> Option<DirId> {
        self.parent
    }

    /// Child directories, always ordered by name
    pub fn directories(&self) -> &[DirId] {
        &self.directories
    }

    /// Files in stored order: sorted by the sort mode, descending when reversed
    pub fn files(&self) -> &[FileId] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// File at a playback position. Position 0 is the first file to play,
    /// counted from the end of the stored order when the node is reversed.
    pub fn file_at(&self, index: usize) -> Option<FileId> {
        if index >= self.files.len() {
            return None;
        }
        let index = if self.reverse {
            self.files.len() - 1 - index
        } else {
            index
        };
        self.files.get(index).copied()
    }

    /// Playback position of a file, the inverse of [`file_at`](Self::file_at).
    pub fn position_of(&self, file: FileId) -> Option<usize> {
        let index = self.files.iter().position(|&f| f == file)?;
        Some(if self.reverse {
            self.files.len() - 1 - index
        } else {
            index
        })
    }
}
