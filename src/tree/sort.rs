//! File ordering within a directory node or playlist.

use crate::media::MediaFile;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Discovery order
    #[default]
    None,
    /// Display name, ordinal comparison
    Name,
    /// Filesystem last-write time
    ModifiedDate,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortMode::None => "None",
            SortMode::Name => "Name",
            SortMode::ModifiedDate => "ModifiedDate",
        };
        f.write_str(label)
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(SortMode::None),
            "name" => Ok(SortMode::Name),
            "modified" | "modifieddate" | "modified_date" => Ok(SortMode::ModifiedDate),
            _ => Err(format!(
                "Unknown sort mode '{s}' (expected none, name or modified)"
            )),
        }
    }
}

/// Compare two files under a sort mode. `None` treats everything as equal.
pub fn compare(a: &MediaFile, b: &MediaFile, mode: SortMode, reverse: bool) -> Ordering {
    let (a, b) = if reverse { (b, a) } else { (a, b) };
    match mode {
        SortMode::None => Ordering::Equal,
        SortMode::Name => a.name().cmp(b.name()),
        SortMode::ModifiedDate => a.modified().cmp(&b.modified()),
    }
}

/// Stable-sort `items` by the file each one resolves to.
///
/// Items that do not resolve keep their relative order and move to the end.
/// With `SortMode::None` the slice is left untouched.
pub fn sort_by_mode<'a, T, F>(items: &mut [T], mode: SortMode, reverse: bool, lookup: F)
where
    F: Fn(&T) -> Option<&'a MediaFile>,
{
    if mode == SortMode::None {
        return;
    }
    items.sort_by(|x, y| match (lookup(x), lookup(y)) {
        (Some(a), Some(b)) => compare(a, b, mode, reverse),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
