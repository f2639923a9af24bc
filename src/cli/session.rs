//! Loading and saving the library around a single command.

use media_scope::config::Config;
use media_scope::state::LibraryState;
use media_scope::utils::progress::create_progress_spinner;
use media_scope::utils::validation::expand_path;
use media_scope::{FileId, Library};
use owo_colors::OwoColorize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

pub struct Session {
    pub config: Config,
    pub library: Library,
    state_path: PathBuf,
}

impl Session {
    /// Load config and state, then restore and rescan every scope.
    pub fn open() -> Result<Self, Box<dyn Error>> {
        Self::open_with_depth(None)
    }

    /// Like [`open`](Self::open), overriding the configured scan depth.
    pub fn open_with_depth(recursive: Option<bool>) -> Result<Self, Box<dyn Error>> {
        let config = Config::load()?;
        let state_path = Config::state_path()?;
        let state = LibraryState::load(&state_path)?;

        let spinner = create_progress_spinner("Scanning scopes...");
        let library = Library::restore(&state, recursive.unwrap_or(config.recursive_scan));
        spinner.finish_and_clear();

        log::debug!(
            "Restored {} scopes, {} playlists and {} categories",
            library.scopes().len(),
            library.playlists().len(),
            library.categories().len()
        );

        Ok(Self {
            config,
            library,
            state_path,
        })
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        self.library.snapshot().save(&self.state_path)?;
        Ok(())
    }

    /// Resolve a file given either its identifier or its path.
    pub fn resolve_file(&self, reference: &str) -> Result<FileId, Box<dyn Error>> {
        if let Some(id) = self.library.find_media(reference) {
            return Ok(id);
        }

        let path = expand_path(reference)?;
        let path = fs::canonicalize(&path).unwrap_or(path);
        self.library.find_by_location(&path).ok_or_else(|| {
            format!(
                "{} No file in any scope matches: {}",
                "Error:".red().bold(),
                reference
            )
            .into()
        })
    }
}
