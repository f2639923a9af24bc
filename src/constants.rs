//! Project-wide constants used across multiple modules.
//!
//! This module centralizes constant definitions to avoid duplication and ensure
//! consistency across the codebase.

/// Spinner animation characters for progress indicators
pub const SPINNER_CHARS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Supported audio file extensions
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "aac", "mp3", "aiff", "pcm", "wma", "flac", "alac"];

/// Supported video file extensions
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "wmv", "flv", "avi"];

/// Supported image file extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Separator between the parent and location parts of a file identifier
pub const IDENTIFIER_SEPARATOR: char = ':';

/// Separator used when joining category names for display and persistence
pub const CATEGORY_SEPARATOR: &str = ", ";

/// Name of the application directory under the user's config directory
pub const APP_DIR_NAME: &str = "media-scope";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Persisted library state file name
pub const STATE_FILE_NAME: &str = "library.toml";
