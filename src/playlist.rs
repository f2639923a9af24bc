//! Named, ordered, duplicate-free collections of file references.
//!
//! A playlist does not own its files. It stores [`FileId`]s and callers resolve
//! them through the tree (or [`Library`](crate::library::Library)) that owns
//! the files. When a rescan disposes a file, its id simply stops resolving.

use crate::tree::{FileId, SortMode};

#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub name: String,
    pub sort_mode: SortMode,
    pub reverse: bool,
    entries: Vec<FileId>,
}

impl Playlist {
    /// An empty playlist sorted by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort_mode: SortMode::Name,
            reverse: false,
            entries: Vec::new(),
        }
    }

    /// Build a playlist from resolved references. Unresolved entries (`None`)
    /// are dropped, as are repeats of a file already present.
    pub fn with_entries<I>(
        name: impl Into<String>,
        sort_mode: SortMode,
        reverse: bool,
        entries: I,
    ) -> Self
    where
        I: IntoIterator<Item = Option<FileId>>,
    {
        let mut playlist = Self {
            name: name.into(),
            sort_mode,
            reverse,
            entries: Vec::new(),
        };
        for file in entries.into_iter().flatten() {
            playlist.add(file);
        }
        playlist
    }

    /// Append a file unless it is already present. Returns whether it was added.
    pub fn add(&mut self, file: FileId) -> bool {
        if self.contains(file) {
            return false;
        }
        self.entries.push(file);
        true
    }

    /// Remove every occurrence of a file. Returns how many were removed.
    pub fn remove(&mut self, file: FileId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&f| f != file);
        before - self.entries.len()
    }

    pub fn contains(&self, file: FileId) -> bool {
        self.entries.contains(&file)
    }

    pub fn get(&self, index: usize) -> Option<FileId> {
        self.entries.get(index).copied()
    }

    pub fn position_of(&self, file: FileId) -> Option<usize> {
        self.entries.iter().position(|&f| f == file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileId] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = FileId> + '_ {
        self.entries.iter().copied()
    }

    /// Move the entry at `from` so that it ends up at `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() || to >= self.entries.len() {
            return false;
        }
        let file = self.entries.remove(from);
        self.entries.insert(to, file);
        true
    }

    /// Drop entries that no longer resolve. Returns how many were dropped.
    pub fn prune(&mut self, resolves: impl Fn(FileId) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&f| resolves(f));
        before - self.entries.len()
    }

    /// Reorder the entries in place, for callers that sort by file attributes.
    pub fn entries_mut(&mut self) -> &mut [FileId] {
        &mut self.entries
    }
}
