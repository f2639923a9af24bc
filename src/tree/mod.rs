//! The media directory tree and its rescan algorithm.
//!
//! A [`MediaTree`] mirrors one scope: a root directory and, recursively, its
//! subdirectories and files. Nodes and files live in arenas owned by the tree
//! and are addressed by [`DirId`] and [`FileId`]. Those ids are the identity
//! that a rescan preserves: an entry whose location is still present after the
//! rescan keeps its id, its user metadata and (for directories) its own
//! children and sort settings. Entries that disappeared from disk are disposed,
//! after which their ids resolve to nothing.
//!
//! Rescanning is best-effort. A directory that cannot be listed keeps its
//! previous snapshot and the failure is logged; the caller never sees it.
//!
//! The tree has no internal locking. Independent trees share no state and may
//! be rescanned in parallel.

pub mod arena;
pub mod directory;
pub mod reconcile;
pub mod sort;

pub use directory::MediaDirectory;
pub use sort::SortMode;

use crate::error::{MediaError, Result};
use crate::media::MediaFile;
use crate::media::file::location_key;
use arena::{Arena, SlotId};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one tree within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(u32);

impl TreeId {
    fn next() -> Self {
        TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirId {
    tree: TreeId,
    slot: SlotId,
}

impl DirId {
    pub fn tree(&self) -> TreeId {
        self.tree
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    tree: TreeId,
    slot: SlotId,
}

impl FileId {
    pub fn tree(&self) -> TreeId {
        self.tree
    }
}

/// What one directory listing found
#[derive(Debug, Default)]
struct Listing {
    directories: Vec<PathBuf>,
    files: Vec<(PathBuf, SystemTime)>,
}

/// List a directory completely before anything is changed.
///
/// Directory symlinks are not followed. File symlinks count when they resolve
/// to a regular file; broken ones are skipped.
fn list_directory(path: &Path) -> io::Result<Listing> {
    let mut listing = Listing::default();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            listing.directories.push(path);
            continue;
        }

        let metadata = if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("Skipping unresolvable link '{}': {e}", path.display());
                    continue;
                }
            }
        } else {
            entry.metadata()?
        };

        if metadata.is_file() {
            let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
            listing.files.push((path, modified));
        }
    }

    Ok(listing)
}

#[derive(Debug)]
pub struct MediaTree {
    id: TreeId,
    root: DirId,
    dirs: Arena<MediaDirectory>,
    files: Arena<MediaFile>,
}

impl MediaTree {
    /// Create a tree for a scope root. The tree starts empty; call
    /// [`rescan`](Self::rescan) to populate it.
    pub fn open(location: impl AsRef<Path>) -> Result<Self> {
        let location = location.as_ref();
        if location.as_os_str().is_empty() {
            return Err(MediaError::InvalidArgument(
                "scope location must not be empty".to_string(),
            ));
        }
        if !location.is_dir() {
            return Err(MediaError::NotFound(location.to_path_buf()));
        }

        let id = TreeId::next();
        let mut dirs = Arena::new();
        let slot = dirs.insert_with(|slot| {
            MediaDirectory::new(DirId { tree: id, slot }, location.to_path_buf(), None)
        });

        Ok(Self {
            id,
            root: DirId { tree: id, slot },
            dirs,
            files: Arena::new(),
        })
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn root(&self) -> DirId {
        self.root
    }

    pub fn root_dir(&self) -> &MediaDirectory {
        self.dir(self.root).expect("root node lives as long as its tree")
    }

    pub fn location(&self) -> &Path {
        self.root_dir().location()
    }

    pub fn dir(&self, id: DirId) -> Option<&MediaDirectory> {
        if id.tree != self.id {
            return None;
        }
        self.dirs.get(id.slot)
    }

    pub fn file(&self, id: FileId) -> Option<&MediaFile> {
        if id.tree != self.id {
            return None;
        }
        self.files.get(id.slot)
    }

    pub fn file_mut(&mut self, id: FileId) -> Option<&mut MediaFile> {
        if id.tree != self.id {
            return None;
        }
        self.files.get_mut(id.slot)
    }

    pub fn directory_count(&self) -> usize {
        self.dirs.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn node(&self, id: DirId) -> Result<&MediaDirectory> {
        self.dir(id).ok_or(MediaError::UnknownNode)
    }

    /// Re-synchronize a node with the filesystem.
    ///
    /// With `recursive`, every retained and newly found subdirectory is
    /// rescanned too. Filesystem errors are logged and leave the failing node
    /// as it was; the only error returned is for an id this tree does not own.
    pub fn rescan(&mut self, dir: DirId, recursive: bool) -> Result<()> {
        self.node(dir)?;
        self.scan_node(dir, recursive);
        Ok(())
    }

    fn scan_node(&mut self, dir: DirId, recursive: bool) {
        let Some(location) = self.dir(dir).map(|d| d.location().to_path_buf()) else {
            return;
        };

        match list_directory(&location) {
            Ok(listing) => {
                self.reconcile_directories(dir, listing.directories, recursive);
                self.reconcile_files(dir, listing.files);
            }
            Err(e) => {
                warn!("Failed to rescan '{}': {e}", location.display());
            }
        }
    }

    fn reconcile_directories(&mut self, dir: DirId, discovered: Vec<PathBuf>, recursive: bool) {
        let previous: Vec<(PathBuf, DirId)> = self.children_keyed(dir);
        let discovered = discovered.into_iter().map(|path| (path.clone(), path));

        let tree = self.id;
        let dirs = &mut self.dirs;
        let merge = reconcile::merge_by_key(previous, discovered, |existing, path| {
            existing.unwrap_or_else(|| {
                debug!("New directory: {}", path.display());
                let slot = dirs.insert_with(|slot| {
                    MediaDirectory::new(DirId { tree, slot }, path, Some(dir))
                });
                DirId { tree, slot }
            })
        });

        for removed in merge.removed {
            self.dispose_directory(removed);
        }

        let mut entries = merge.entries;
        entries.sort_by(|a, b| self.dir_name(*a).cmp(self.dir_name(*b)));

        if let Some(node) = self.dirs.get_mut(dir.slot) {
            node.directories = entries.clone();
        }

        if recursive {
            for child in entries {
                self.scan_node(child, true);
            }
        }
    }

    fn reconcile_files(&mut self, dir: DirId, discovered: Vec<(PathBuf, SystemTime)>) {
        let Some(node) = self.dirs.get(dir.slot) else {
            return;
        };
        // Keyed on the real path; distinct non-UTF-8 names can share a lossy key
        let previous: Vec<(PathBuf, FileId)> = node
            .files
            .iter()
            .filter_map(|&id| {
                self.files
                    .get(id.slot)
                    .map(|f| (f.location().to_path_buf(), id))
            })
            .collect();
        let discovered = discovered
            .into_iter()
            .map(|(path, modified)| (path.clone(), (path, modified)));

        let tree = self.id;
        let files = &mut self.files;
        let merge = reconcile::merge_by_key(previous, discovered, |existing, (path, modified)| {
            match existing {
                Some(id) => {
                    if let Some(file) = files.get_mut(id.slot) {
                        file.set_modified(modified);
                    }
                    id
                }
                None => {
                    debug!("New file: {}", path.display());
                    let slot = files.insert(MediaFile::new(path, modified, node));
                    FileId { tree, slot }
                }
            }
        });

        for removed in merge.removed {
            if let Some(file) = self.files.remove(removed.slot) {
                debug!("Disposed file: {}", file.location().display());
            }
        }

        if let Some(node) = self.dirs.get_mut(dir.slot) {
            node.discovered = merge.entries;
        }
        self.sort_files(dir);
    }

    fn children_keyed(&self, dir: DirId) -> Vec<(PathBuf, DirId)> {
        self.dir(dir)
            .map(|node| {
                node.directories
                    .iter()
                    .filter_map(|&id| self.dir(id).map(|d| (d.location().to_path_buf(), id)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn dir_name(&self, id: DirId) -> &str {
        self.dir(id).map(MediaDirectory::name).unwrap_or_default()
    }

    /// Drop a directory node and everything beneath it.
    fn dispose_directory(&mut self, id: DirId) {
        let Some(node) = self.dirs.remove(id.slot) else {
            return;
        };
        debug!("Disposed directory: {}", node.location().display());
        for file in node.files {
            self.files.remove(file.slot);
        }
        for child in node.directories {
            self.dispose_directory(child);
        }
    }

    fn sort_files(&mut self, dir: DirId) {
        let Some(node) = self.dirs.get_mut(dir.slot) else {
            return;
        };
        let (mode, reverse) = (node.sort_mode, node.reverse);
        node.files.clone_from(&node.discovered);
        let files = &self.files;
        sort::sort_by_mode(&mut node.files, mode, reverse, |id| files.get(id.slot));
    }

    /// Change a node's sort mode, re-sorting its current files in place.
    pub fn set_sort_mode(&mut self, dir: DirId, mode: SortMode) -> Result<()> {
        self.node(dir)?;
        if let Some(node) = self.dirs.get_mut(dir.slot) {
            if node.sort_mode == mode {
                return Ok(());
            }
            node.sort_mode = mode;
        }
        self.sort_files(dir);
        Ok(())
    }

    /// Change a node's reverse flag, re-sorting its current files in place.
    pub fn set_reverse(&mut self, dir: DirId, reverse: bool) -> Result<()> {
        self.node(dir)?;
        if let Some(node) = self.dirs.get_mut(dir.slot) {
            if node.reverse == reverse {
                return Ok(());
            }
            node.reverse = reverse;
        }
        self.sort_files(dir);
        Ok(())
    }

    /// File at a playback position of a node. See [`MediaDirectory::file_at`].
    pub fn file_at(&self, dir: DirId, index: usize) -> Option<FileId> {
        self.dir(dir)?.file_at(index)
    }

    /// Playback position of a file within a node.
    pub fn position_of(&self, dir: DirId, file: FileId) -> Option<usize> {
        self.dir(dir)?.position_of(file)
    }

    /// Find a file by absolute location, ignoring case.
    ///
    /// Searches the node's own files, then each child depth-first in child
    /// order when `recursive`.
    pub fn find_by_location(
        &self,
        dir: DirId,
        location: impl AsRef<Path>,
        recursive: bool,
    ) -> Option<FileId> {
        let wanted = location_key(location.as_ref()).to_lowercase();
        self.search(dir, recursive, &|file: &MediaFile| {
            file.location_key().to_lowercase() == wanted
        })
    }

    /// Find a file by its identifier, with the same traversal as
    /// [`find_by_location`](Self::find_by_location).
    pub fn find_by_identifier(
        &self,
        dir: DirId,
        identifier: &str,
        recursive: bool,
    ) -> Option<FileId> {
        self.search(dir, recursive, &|file: &MediaFile| {
            file.identifier() == identifier
        })
    }

    fn search(
        &self,
        dir: DirId,
        recursive: bool,
        matches: &dyn Fn(&MediaFile) -> bool,
    ) -> Option<FileId> {
        let node = self.dir(dir)?;
        let found = node
            .files
            .iter()
            .copied()
            .find(|&id| self.file(id).is_some_and(matches));
        if found.is_some() || !recursive {
            return found;
        }
        node.directories
            .iter()
            .find_map(|&child| self.search(child, true, matches))
    }

    /// Find a directory node anywhere in the tree by location, ignoring case.
    pub fn find_directory(&self, location: impl AsRef<Path>) -> Option<DirId> {
        let wanted = location_key(location.as_ref())
            .trim_end_matches('/')
            .to_lowercase();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.dir(id)?;
            if node.location_key().trim_end_matches('/').to_lowercase() == wanted {
                return Some(id);
            }
            stack.extend(node.directories.iter().rev());
        }
        None
    }

    /// Every file in the tree, depth-first: a node's files, then its children.
    pub fn walk_files(&self) -> Vec<FileId> {
        let mut out = Vec::new();
        self.collect_files(self.root, &mut out);
        out
    }

    fn collect_files(&self, dir: DirId, out: &mut Vec<FileId>) {
        if let Some(node) = self.dir(dir) {
            out.extend(node.files.iter().copied());
            for &child in &node.directories {
                self.collect_files(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"fake").unwrap();
    }

    fn set_mtime(path: &Path, secs: u64) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
    }

    fn names(tree: &MediaTree, dir: DirId) -> Vec<String> {
        tree.dir(dir)
            .unwrap()
            .files()
            .iter()
            .map(|&id| tree.file(id).unwrap().name().to_string())
            .collect()
    }

    fn scanned(temp_dir: &TempDir) -> MediaTree {
        let mut tree = MediaTree::open(temp_dir.path()).unwrap();
        let root = tree.root();
        tree.rescan(root, true).unwrap();
        tree
    }

    #[test]
    fn test_open_missing_directory() {
        let result = MediaTree::open("/this/path/does/not/exist/hopefully/12345");
        assert!(matches!(result, Err(MediaError::NotFound(_))));
        assert!(matches!(
            MediaTree::open(""),
            Err(MediaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_open_file_is_not_a_scope() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.mp3");
        touch(&file);
        assert!(matches!(MediaTree::open(&file), Err(MediaError::NotFound(_))));
    }

    #[test]
    fn test_same_location_same_identifier() {
        let temp_dir = TempDir::new().unwrap();
        let a = MediaTree::open(temp_dir.path()).unwrap();
        let b = MediaTree::open(temp_dir.path()).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.root_dir().identifier(), b.root_dir().identifier());
    }

    #[test]
    fn test_rescan_discovers_files_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("b.mp3"));
        touch(&temp_dir.path().join("a.wav"));
        fs::create_dir(temp_dir.path().join("zeta")).unwrap();
        fs::create_dir(temp_dir.path().join("alpha")).unwrap();
        touch(&temp_dir.path().join("alpha").join("nested.flac"));

        let tree = scanned(&temp_dir);
        let root = tree.root_dir();
        assert_eq!(root.len(), 2);

        let children: Vec<&str> = root
            .directories()
            .iter()
            .map(|&id| tree.dir(id).unwrap().name())
            .collect();
        assert_eq!(children, vec!["alpha", "zeta"]);

        let alpha = tree.dir(root.directories()[0]).unwrap();
        assert_eq!(alpha.len(), 1);
        assert_eq!(alpha.parent(), Some(tree.root()));
        assert_eq!(tree.file_count(), 3);
    }

    #[test]
    fn test_rescan_preserves_identity_and_metadata() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("a.mp3"));
        touch(&temp_dir.path().join("b.mp3"));
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        let a = tree
            .find_by_location(root, temp_dir.path().join("a.mp3"), false)
            .unwrap();
        let b = tree
            .find_by_location(root, temp_dir.path().join("b.mp3"), false)
            .unwrap();
        let sub = tree.root_dir().directories()[0];
        let identifier = tree.file(a).unwrap().identifier().to_string();
        tree.file_mut(a).unwrap().comment = "keep me".to_string();
        tree.set_sort_mode(sub, SortMode::Name).unwrap();

        tree.rescan(root, true).unwrap();

        let files = tree.root_dir().files();
        assert!(files.contains(&a));
        assert!(files.contains(&b));
        assert_eq!(tree.root_dir().directories(), &[sub]);
        assert_eq!(tree.dir(sub).unwrap().sort_mode(), SortMode::Name);
        let file = tree.file(a).unwrap();
        assert_eq!(file.comment, "keep me");
        assert_eq!(file.identifier(), identifier);
    }

    #[test]
    fn test_rescan_drops_deleted_file() {
        let temp_dir = TempDir::new().unwrap();
        let b_path = temp_dir.path().join("b.mp3");
        touch(&temp_dir.path().join("a.mp3"));
        touch(&b_path);

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        let b = tree.find_by_location(root, &b_path, false).unwrap();

        fs::remove_file(&b_path).unwrap();
        tree.rescan(root, false).unwrap();

        assert!(!tree.root_dir().files().contains(&b));
        assert!(tree.file(b).is_none());
        assert!(tree.find_by_location(root, &b_path, true).is_none());
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn test_rescan_adds_new_file_in_sort_order() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("a.mp3"));
        touch(&temp_dir.path().join("c.mp3"));

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        tree.set_sort_mode(root, SortMode::Name).unwrap();

        let new_path = temp_dir.path().join("b.mp3");
        touch(&new_path);
        tree.rescan(root, false).unwrap();

        assert_eq!(names(&tree, root), vec!["a", "b", "c"]);
        assert!(tree.find_by_location(root, &new_path, false).is_some());
    }

    #[test]
    fn test_removed_directory_disposes_subtree() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        let deeper = sub.join("deeper");
        fs::create_dir_all(&deeper).unwrap();
        touch(&sub.join("one.mp3"));
        touch(&deeper.join("two.mp3"));

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        let two = tree
            .find_by_location(root, deeper.join("two.mp3"), true)
            .unwrap();
        assert_eq!(tree.directory_count(), 3);

        fs::remove_dir_all(&sub).unwrap();
        tree.rescan(root, true).unwrap();

        assert!(tree.root_dir().directories().is_empty());
        assert!(tree.file(two).is_none());
        assert_eq!(tree.directory_count(), 1);
        assert_eq!(tree.file_count(), 0);
    }

    #[test]
    fn test_non_recursive_rescan_leaves_children_alone() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        touch(&sub.join("late.mp3"));
        tree.rescan(root, false).unwrap();
        assert!(tree.find_by_location(root, sub.join("late.mp3"), true).is_none());

        tree.rescan(root, true).unwrap();
        assert!(tree.find_by_location(root, sub.join("late.mp3"), true).is_some());
    }

    #[test]
    fn test_failed_rescan_keeps_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("a.mp3"));

        let mut tree = scanned(&temp_dir);
        let sub_id = tree.root_dir().directories()[0];
        let before = tree.dir(sub_id).unwrap().files().to_vec();

        // Listing a vanished directory fails; the node must stay as it was
        fs::remove_dir_all(&sub).unwrap();
        tree.rescan(sub_id, false).unwrap();

        assert_eq!(tree.dir(sub_id).unwrap().files(), before.as_slice());
    }

    #[test]
    fn test_sort_by_name_and_reverse() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["delta.mp3", "alpha.mp3", "Charlie.mp3", "bravo.mp3"] {
            touch(&temp_dir.path().join(name));
        }

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        let identifiers: Vec<String> = tree
            .walk_files()
            .iter()
            .map(|&id| tree.file(id).unwrap().identifier().to_string())
            .collect();

        tree.set_sort_mode(root, SortMode::Name).unwrap();
        assert_eq!(names(&tree, root), vec!["Charlie", "alpha", "bravo", "delta"]);

        tree.set_reverse(root, true).unwrap();
        assert_eq!(names(&tree, root), vec!["delta", "bravo", "alpha", "Charlie"]);

        let mut after: Vec<String> = tree
            .walk_files()
            .iter()
            .map(|&id| tree.file(id).unwrap().identifier().to_string())
            .collect();
        let mut before = identifiers;
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sort_by_modified_date() {
        let temp_dir = TempDir::new().unwrap();
        let paths = [
            (temp_dir.path().join("new.mp3"), 3_000),
            (temp_dir.path().join("old.mp3"), 1_000),
            (temp_dir.path().join("mid.mp3"), 2_000),
        ];
        for (path, secs) in &paths {
            touch(path);
            set_mtime(path, *secs);
        }

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        tree.set_sort_mode(root, SortMode::ModifiedDate).unwrap();
        assert_eq!(names(&tree, root), vec!["old", "mid", "new"]);

        tree.set_reverse(root, true).unwrap();
        assert_eq!(names(&tree, root), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_rescan_refreshes_modified_time() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.mp3");
        let b = temp_dir.path().join("b.mp3");
        touch(&a);
        touch(&b);
        set_mtime(&a, 1_000);
        set_mtime(&b, 2_000);

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        tree.set_sort_mode(root, SortMode::ModifiedDate).unwrap();
        assert_eq!(names(&tree, root), vec!["a", "b"]);

        set_mtime(&a, 3_000);
        tree.rescan(root, false).unwrap();
        assert_eq!(names(&tree, root), vec!["b", "a"]);
    }

    #[test]
    fn test_index_accessors_honor_reverse() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.mp3", "b.mp3", "c.mp3"] {
            touch(&temp_dir.path().join(name));
        }

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        tree.set_sort_mode(root, SortMode::Name).unwrap();
        tree.set_reverse(root, true).unwrap();

        let stored = tree.root_dir().files().to_vec();
        assert_eq!(tree.file_at(root, 0), Some(stored[2]));
        assert_eq!(tree.file_at(root, 2), Some(stored[0]));
        assert_eq!(tree.file_at(root, 3), None);

        for index in 0..3 {
            let file = tree.file_at(root, index).unwrap();
            assert_eq!(tree.position_of(root, file), Some(index));
        }
    }

    #[test]
    fn test_position_of_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("a.mp3"));

        let tree = scanned(&temp_dir);
        let file = tree.walk_files()[0];
        assert_eq!(tree.position_of(tree.root(), file), None);
    }

    #[test]
    fn test_find_by_location_ignores_case() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("Song.MP3"));
        let tree = scanned(&temp_dir);

        let upper = temp_dir.path().join("SONG.mp3");
        assert!(tree.find_by_location(tree.root(), &upper, false).is_some());
        assert!(
            tree.find_by_location(tree.root(), temp_dir.path().join("other.mp3"), true)
                .is_none()
        );
    }

    #[test]
    fn test_find_by_identifier_recursive_only_when_asked() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("deep.mp3"));

        let tree = scanned(&temp_dir);
        let deep = tree.walk_files()[0];
        let identifier = tree.file(deep).unwrap().identifier().to_string();

        assert_eq!(tree.find_by_identifier(tree.root(), &identifier, false), None);
        assert_eq!(
            tree.find_by_identifier(tree.root(), &identifier, true),
            Some(deep)
        );
        assert_eq!(tree.find_by_identifier(tree.root(), "nope", true), None);
    }

    #[test]
    fn test_find_directory() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("Sub").join("Deeper");
        fs::create_dir_all(&sub).unwrap();

        let tree = scanned(&temp_dir);
        let found = tree.find_directory(&sub).unwrap();
        assert_eq!(tree.dir(found).unwrap().name(), "Deeper");
        assert_eq!(tree.find_directory(temp_dir.path()), Some(tree.root()));
        assert_eq!(tree.find_directory(temp_dir.path().join("missing")), None);
    }

    #[test]
    fn test_foreign_ids_do_not_resolve() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        touch(&first.path().join("a.mp3"));
        touch(&second.path().join("a.mp3"));

        let mut a = scanned(&first);
        let b = scanned(&second);
        let foreign = b.walk_files()[0];

        assert!(a.file(foreign).is_none());
        assert!(a.file_mut(foreign).is_none());
        assert!(matches!(
            a.rescan(b.root(), false),
            Err(MediaError::UnknownNode)
        ));
    }

    #[test]
    fn test_none_restores_discovery_order() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["c.mp3", "a.mp3", "b.mp3"] {
            touch(&temp_dir.path().join(name));
        }

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        let discovered = tree.root_dir().files().to_vec();

        tree.set_sort_mode(root, SortMode::Name).unwrap();
        assert_eq!(names(&tree, root), vec!["a", "b", "c"]);

        tree.set_sort_mode(root, SortMode::None).unwrap();
        assert_eq!(tree.root_dir().files(), discovered.as_slice());
    }

    #[test]
    fn test_equal_modified_times_keep_order_across_rescans() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["x.mp3", "y.mp3", "z.mp3"] {
            let path = temp_dir.path().join(name);
            touch(&path);
            set_mtime(&path, 1_000);
        }
        let early = temp_dir.path().join("w.mp3");
        touch(&early);
        set_mtime(&early, 500);

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        tree.set_sort_mode(root, SortMode::ModifiedDate).unwrap();
        let first = tree.root_dir().files().to_vec();
        assert_eq!(tree.file(first[0]).unwrap().name(), "w");

        tree.rescan(root, false).unwrap();
        assert_eq!(tree.root_dir().files(), first.as_slice());
        tree.rescan(root, false).unwrap();
        assert_eq!(tree.root_dir().files(), first.as_slice());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_keep_identity() {
        use std::collections::HashSet;
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        for raw in [&b"a\xff.mp3"[..], &b"a\xfe.mp3"[..]] {
            touch(&temp_dir.path().join(OsStr::from_bytes(raw)));
        }
        let sub = temp_dir.path().join(OsStr::from_bytes(b"d\xff"));
        fs::create_dir(&sub).unwrap();
        fs::create_dir(temp_dir.path().join(OsStr::from_bytes(b"d\xfe"))).unwrap();
        touch(&sub.join("inner.mp3"));

        let mut tree = scanned(&temp_dir);
        let root = tree.root();
        let files: HashSet<FileId> = tree.root_dir().files().iter().copied().collect();
        let dirs: HashSet<DirId> = tree.root_dir().directories().iter().copied().collect();
        assert_eq!(files.len(), 2);
        assert_eq!(dirs.len(), 2);
        for &id in &files {
            tree.file_mut(id).unwrap().comment = "kept".to_string();
        }

        tree.rescan(root, true).unwrap();
        tree.rescan(root, true).unwrap();

        let after: HashSet<FileId> = tree.root_dir().files().iter().copied().collect();
        let after_dirs: HashSet<DirId> = tree.root_dir().directories().iter().copied().collect();
        assert_eq!(after, files);
        assert_eq!(after_dirs, dirs);
        assert!(after.iter().all(|&id| tree.file(id).unwrap().comment == "kept"));
        assert_eq!(tree.file_count(), 3);
    }
}
