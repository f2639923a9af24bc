//! Error types for the media catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, MediaError>;

#[derive(Error, Debug)]
pub enum MediaError {
    /// A required argument was missing, blank or otherwise unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A directory or file that must exist was not found
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A slot id that no longer refers to a live node in the tree
    #[error("Unknown or disposed tree node")]
    UnknownNode,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode library state: {0}")]
    StateDecode(#[from] toml::de::Error),

    #[error("Failed to encode library state: {0}")]
    StateEncode(#[from] toml::ser::Error),
}
