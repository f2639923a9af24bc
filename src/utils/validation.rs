//! Validation of user-supplied paths before they reach the library.

use owo_colors::OwoColorize;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Expand a leading `~` and environment variables in a user-supplied path.
pub fn expand_path(path: &str) -> Result<PathBuf, Box<dyn Error>> {
    let expanded = shellexpand::full(path)?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Check that a path can serve as a scope root.
pub fn validate_scope_root(path: &Path) -> Result<(), Box<dyn Error>> {
    if !path.exists() {
        return Err(format!(
            "{} Scope location does not exist: {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    }
    if !path.is_dir() {
        return Err(format!(
            "{} Scope location is not a directory: {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    }
    Ok(())
}
