//! The library session: every configured scope, the playlists over their
//! files, the category interner and the expanded-node keys of the
//! presentation tree.
//!
//! The library is what the persisted [`LibraryState`] is restored into and
//! snapshotted from. Restoring rebinds persisted file identifiers to live
//! files after the scopes have been rescanned; identifiers that no longer
//! resolve are dropped without failing the load.

use crate::error::{MediaError, Result};
use crate::media::{CategoryInterner, MediaFile};
use crate::playlist::Playlist;
use crate::state::{LibraryState, MetadataRecord, PlaylistRecord};
use crate::tree::{FileId, MediaTree, SortMode, TreeId, sort};
use log::{info, warn};
use rayon::prelude::*;
use std::path::Path;

#[derive(Debug, Default)]
pub struct Library {
    scopes: Vec<MediaTree>,
    playlists: Vec<Playlist>,
    categories: CategoryInterner,
    expanded: Vec<String>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scope root. It is not scanned until the next rescan.
    pub fn add_scope(&mut self, location: impl AsRef<Path>) -> Result<TreeId> {
        let location = location.as_ref();
        if self.scopes.iter().any(|scope| scope.location() == location) {
            return Err(MediaError::InvalidArgument(format!(
                "scope already registered: {}",
                location.display()
            )));
        }

        let tree = MediaTree::open(location)?;
        let id = tree.id();
        info!("Added scope: {}", location.display());
        self.scopes.push(tree);
        Ok(id)
    }

    /// Remove a scope by its exact location. Playlist entries into it stop
    /// resolving until [`prune_playlists`](Self::prune_playlists) drops them.
    pub fn remove_scope(&mut self, location: impl AsRef<Path>) -> bool {
        let location = location.as_ref();
        let before = self.scopes.len();
        self.scopes.retain(|scope| scope.location() != location);
        before != self.scopes.len()
    }

    pub fn scopes(&self) -> &[MediaTree] {
        &self.scopes
    }

    pub fn tree(&self, id: TreeId) -> Option<&MediaTree> {
        self.scopes.iter().find(|scope| scope.id() == id)
    }

    pub fn tree_mut(&mut self, id: TreeId) -> Option<&mut MediaTree> {
        self.scopes.iter_mut().find(|scope| scope.id() == id)
    }

    /// Rescan every scope. Scopes share nothing, so they are scanned in parallel.
    pub fn rescan_all(&mut self, recursive: bool) {
        self.scopes.par_iter_mut().for_each(|scope| {
            let root = scope.root();
            if let Err(e) = scope.rescan(root, recursive) {
                warn!("Failed to rescan scope '{}': {e}", scope.location().display());
            }
        });
    }

    pub fn file(&self, id: FileId) -> Option<&MediaFile> {
        self.tree(id.tree())?.file(id)
    }

    pub fn file_mut(&mut self, id: FileId) -> Option<&mut MediaFile> {
        self.tree_mut(id.tree())?.file_mut(id)
    }

    /// Resolve a file identifier by searching every scope in order.
    pub fn find_media(&self, identifier: &str) -> Option<FileId> {
        self.scopes
            .iter()
            .find_map(|scope| scope.find_by_identifier(scope.root(), identifier, true))
    }

    pub fn find_by_location(&self, location: impl AsRef<Path>) -> Option<FileId> {
        let location = location.as_ref();
        self.scopes
            .iter()
            .find_map(|scope| scope.find_by_location(scope.root(), location, true))
    }

    pub fn categories(&self) -> &CategoryInterner {
        &self.categories
    }

    /// Replace a file's user metadata. `categories` is a comma-separated list.
    pub fn set_metadata(
        &mut self,
        file: FileId,
        comment: Option<&str>,
        categories: Option<&str>,
        image: Option<&str>,
    ) -> Result<()> {
        let parsed = match categories {
            Some(text) => Some(self.categories.parse_list(text)?),
            None => None,
        };
        let entry = self.file_mut(file).ok_or(MediaError::UnknownNode)?;
        if let Some(comment) = comment {
            entry.comment = comment.to_string();
        }
        if let Some(categories) = parsed {
            entry.categories = categories;
        }
        if let Some(image) = image {
            entry.image = (!image.is_empty()).then(|| image.to_string());
        }
        Ok(())
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    pub fn playlist_mut(&mut self, name: &str) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.name == name)
    }

    pub fn create_playlist(&mut self, name: &str, sort_mode: SortMode) -> Result<&mut Playlist> {
        self.check_playlist_name(name)?;
        let mut playlist = Playlist::new(name);
        playlist.sort_mode = sort_mode;
        self.playlists.push(playlist);
        let last = self.playlists.len() - 1;
        Ok(&mut self.playlists[last])
    }

    pub fn rename_playlist(&mut self, name: &str, new_name: &str) -> Result<()> {
        self.check_playlist_name(new_name)?;
        let playlist = self
            .playlist_mut(name)
            .ok_or_else(|| MediaError::InvalidArgument(format!("no playlist named '{name}'")))?;
        playlist.name = new_name.to_string();
        Ok(())
    }

    /// Drop playlist entries whose files are gone. Returns how many were dropped.
    pub fn prune_playlists(&mut self) -> usize {
        let scopes = &self.scopes;
        let resolves = |id: FileId| {
            scopes
                .iter()
                .find(|scope| scope.id() == id.tree())
                .is_some_and(|scope| scope.file(id).is_some())
        };
        let dropped: usize = self
            .playlists
            .iter_mut()
            .map(|playlist| playlist.prune(resolves))
            .sum();
        if dropped > 0 {
            info!("Pruned {dropped} stale playlist entries");
        }
        dropped
    }

    pub fn remove_playlist(&mut self, name: &str) -> Option<Playlist> {
        let index = self.playlists.iter().position(|p| p.name == name)?;
        Some(self.playlists.remove(index))
    }

    fn check_playlist_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(MediaError::InvalidArgument(
                "playlist name must not be blank".to_string(),
            ));
        }
        if self.playlist(name).is_some() {
            return Err(MediaError::InvalidArgument(format!(
                "playlist '{name}' already exists"
            )));
        }
        Ok(())
    }

    /// Sort a playlist's members by its own sort mode and reverse flag.
    /// Members that no longer resolve keep their order at the end.
    pub fn sort_playlist(&mut self, name: &str) -> Result<()> {
        let index = self
            .playlists
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| MediaError::InvalidArgument(format!("no playlist named '{name}'")))?;

        let scopes = &self.scopes;
        let playlist = &mut self.playlists[index];
        let (mode, reverse) = (playlist.sort_mode, playlist.reverse);
        sort::sort_by_mode(playlist.entries_mut(), mode, reverse, |&id| {
            scopes
                .iter()
                .find(|scope| scope.id() == id.tree())
                .and_then(|scope| scope.file(id))
        });
        Ok(())
    }

    pub fn expanded(&self) -> &[String] {
        &self.expanded
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.iter().any(|k| k == key)
    }

    pub fn set_expanded(&mut self, key: &str, expanded: bool) {
        if expanded {
            if !self.is_expanded(key) {
                self.expanded.push(key.to_string());
            }
        } else {
            self.expanded.retain(|k| k != key);
        }
    }

    /// Capture everything that should survive the session.
    pub fn snapshot(&self) -> LibraryState {
        let scopes = self
            .scopes
            .iter()
            .map(|scope| scope.root_dir().location_key().to_string())
            .collect();

        let metadata = self
            .scopes
            .iter()
            .flat_map(|scope| {
                scope
                    .walk_files()
                    .into_iter()
                    .filter_map(move |id| scope.file(id))
            })
            .filter(|file| file.has_metadata())
            .map(|file| MetadataRecord {
                identifier: file.identifier().to_string(),
                comment: (!file.comment.is_empty()).then(|| file.comment.clone()),
                categories: (!file.categories.is_empty()).then(|| file.categories_as_text()),
                image: file.image.clone(),
            })
            .collect();

        let playlists = self
            .playlists
            .iter()
            .map(|playlist| PlaylistRecord {
                name: playlist.name.clone(),
                sort_mode: playlist.sort_mode,
                reverse: playlist.reverse,
                members: playlist
                    .iter()
                    .filter_map(|id| self.file(id))
                    .map(|file| file.identifier().to_string())
                    .collect(),
            })
            .collect();

        LibraryState {
            expanded: self.expanded.clone(),
            scopes,
            metadata,
            playlists,
        }
    }

    /// Rebuild a library from persisted state.
    ///
    /// Scopes that no longer exist are skipped with a warning. Every scope is
    /// rescanned before metadata and playlist members are rebound by
    /// identifier; identifiers that do not resolve are dropped.
    pub fn restore(state: &LibraryState, recursive: bool) -> Self {
        let mut library = Library::new();
        library.expanded = state.expanded.clone();

        for location in &state.scopes {
            if let Err(e) = library.add_scope(location) {
                warn!("Skipping scope '{location}': {e}");
            }
        }
        library.rescan_all(recursive);

        for record in &state.metadata {
            let Some(id) = library.find_media(&record.identifier) else {
                continue;
            };
            let result = library.set_metadata(
                id,
                Some(record.comment.as_deref().unwrap_or_default()),
                Some(record.categories.as_deref().unwrap_or_default()),
                Some(record.image.as_deref().unwrap_or_default()),
            );
            if let Err(e) = result {
                warn!("Ignoring metadata for '{}': {e}", record.identifier);
            }
        }

        for record in &state.playlists {
            let members: Vec<Option<FileId>> = record
                .members
                .iter()
                .map(|identifier| library.find_media(identifier))
                .collect();
            let playlist = Playlist::with_entries(
                record.name.as_str(),
                record.sort_mode,
                record.reverse,
                members,
            );
            library.playlists.push(playlist);
        }

        library
    }
}
