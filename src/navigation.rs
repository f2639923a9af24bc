//! Next/previous stepping through a directory or a playlist.

use crate::playlist::Playlist;
use crate::tree::{DirId, FileId, MediaTree};

/// An ordered sequence of files that playback can step through.
pub trait PlaySequence {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<FileId>;
    fn position_of(&self, file: FileId) -> Option<usize>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlaySequence for Playlist {
    fn len(&self) -> usize {
        Playlist::len(self)
    }

    fn get(&self, index: usize) -> Option<FileId> {
        Playlist::get(self, index)
    }

    fn position_of(&self, file: FileId) -> Option<usize> {
        Playlist::position_of(self, file)
    }
}

/// A directory node seen in playback order.
pub struct DirectoryView<'a> {
    tree: &'a MediaTree,
    dir: DirId,
}

impl<'a> DirectoryView<'a> {
    pub fn new(tree: &'a MediaTree, dir: DirId) -> Self {
        Self { tree, dir }
    }
}

impl PlaySequence for DirectoryView<'_> {
    fn len(&self) -> usize {
        self.tree.dir(self.dir).map_or(0, |d| d.len())
    }

    fn get(&self, index: usize) -> Option<FileId> {
        self.tree.file_at(self.dir, index)
    }

    fn position_of(&self, file: FileId) -> Option<usize> {
        self.tree.position_of(self.dir, file)
    }
}

/// The file after `current`, wrapping to the first. A `current` that is not in
/// the sequence restarts from the first file.
pub fn next<S: PlaySequence + ?Sized>(sequence: &S, current: FileId) -> Option<FileId> {
    let len = sequence.len();
    if len == 0 {
        return None;
    }
    let index = match sequence.position_of(current) {
        Some(position) if position + 1 < len => position + 1,
        _ => 0,
    };
    sequence.get(index)
}

/// The file before `current`, wrapping to the last. A `current` that is not in
/// the sequence restarts from the first file.
pub fn previous<S: PlaySequence + ?Sized>(sequence: &S, current: FileId) -> Option<FileId> {
    let len = sequence.len();
    if len == 0 {
        return None;
    }
    let index = match sequence.position_of(current) {
        Some(0) => len - 1,
        Some(position) => position - 1,
        None => 0,
    };
    sequence.get(index)
}
