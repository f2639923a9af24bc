//! File-type classification from extension.

use crate::constants::{AUDIO_EXTENSIONS, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaKind {
    #[default]
    Unknown,
    Audio,
    Video,
    Image,
}

impl MediaKind {
    /// Classify a file extension, with or without its leading dot.
    ///
    /// Matching is case-insensitive and checks audio, then video, then image.
    pub fn classify(extension: &str) -> Self {
        let extension = extension.trim();
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        if extension.is_empty() {
            return MediaKind::Unknown;
        }

        let matches = |set: &[&str]| set.iter().any(|e| e.eq_ignore_ascii_case(extension));

        if matches(AUDIO_EXTENSIONS) {
            MediaKind::Audio
        } else if matches(VIDEO_EXTENSIONS) {
            MediaKind::Video
        } else if matches(IMAGE_EXTENSIONS) {
            MediaKind::Image
        } else {
            MediaKind::Unknown
        }
    }

    /// Classify a path by its extension. Paths without one are `Unknown`.
    pub fn of_path(path: &Path) -> Self {
        path.extension()
            .map(|e| Self::classify(&e.to_string_lossy()))
            .unwrap_or_default()
    }

    pub fn is_media(self) -> bool {
        self != MediaKind::Unknown
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MediaKind::Unknown => "unknown",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        };
        f.write_str(label)
    }
}

/// Classify a file extension. See [`MediaKind::classify`].
pub fn classify(extension: &str) -> MediaKind {
    MediaKind::classify(extension)
}
