pub mod config;
pub mod constants;
pub mod error;
pub mod identifier;
pub mod library;
pub mod media;
pub mod navigation;
pub mod playlist;
pub mod state;
pub mod tree;
pub mod utils;

pub use error::{MediaError, Result};
pub use library::Library;
pub use media::{Category, CategoryInterner, MediaFile, MediaKind};
pub use playlist::Playlist;
pub use tree::{DirId, FileId, MediaDirectory, MediaTree, SortMode, TreeId};
