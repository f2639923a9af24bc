//! Application configuration management.
//!
//! This module handles the persistent configuration for media-scope: how
//! scopes are scanned, how new playlists are sorted, and where log output goes.
//! Configuration is stored in the user's config directory (typically
//! ~/.config/media-scope/config.toml), next to the persisted library state.

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, STATE_FILE_NAME};
use crate::tree::SortMode;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_recursive_scan")]
    pub recursive_scan: bool,
    #[serde(default = "default_playlist_sort_mode")]
    pub playlist_sort_mode: SortMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

fn default_recursive_scan() -> bool {
    true
}

fn default_playlist_sort_mode() -> SortMode {
    SortMode::Name
}

fn default_log_level() -> String {
    "warn".to_string()
}

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            recursive_scan: default_recursive_scan(),
            playlist_sort_mode: default_playlist_sort_mode(),
            log_level: default_log_level(),
            log_file: None,
        }
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join(APP_DIR_NAME)
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join(APP_DIR_NAME)
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Where the library state (scopes, metadata, playlists) is kept
    pub fn state_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join(STATE_FILE_NAME))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            // Return default config instead of error
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        match key {
            "recursive_scan" => {
                self.recursive_scan = value
                    .parse::<bool>()
                    .map_err(|_| "Value must be 'true' or 'false'")?;
            }
            "playlist_sort_mode" => {
                self.playlist_sort_mode = value.parse::<SortMode>()?;
            }
            "log_level" => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(format!(
                        "Log level must be one of: {}",
                        LOG_LEVELS.join(", ")
                    )
                    .into());
                }
                self.log_level = level;
            }
            "log_file" => {
                self.log_file = (!value.trim().is_empty()).then(|| value.to_string());
            }
            _ => return Err(format!("Unknown configuration key: {key}").into()),
        }
        Ok(())
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Use a mutex to ensure tests that modify environment variables don't run concurrently
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.recursive_scan);
        assert_eq!(config.playlist_sort_mode, SortMode::Name);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("log_level = \"debug\"").unwrap();
        assert!(config.recursive_scan);
        assert_eq!(config.playlist_sort_mode, SortMode::Name);
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::new();

        config.set_value("recursive_scan", "false").unwrap();
        assert!(!config.recursive_scan);
        assert!(config.set_value("recursive_scan", "maybe").is_err());

        config
            .set_value("playlist_sort_mode", "modified")
            .unwrap();
        assert_eq!(config.playlist_sort_mode, SortMode::ModifiedDate);
        assert!(config.set_value("playlist_sort_mode", "size").is_err());

        config.set_value("log_level", "INFO").unwrap();
        assert_eq!(config.log_level, "info");
        assert!(config.set_value("log_level", "loud").is_err());

        config.set_value("log_file", "/tmp/mscope.log").unwrap();
        assert_eq!(config.log_file.as_deref(), Some("/tmp/mscope.log"));
        config.set_value("log_file", "").unwrap();
        assert_eq!(config.log_file, None);

        // Test unknown key
        let result = config.set_value("unknown_key", "value");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        }

        let mut config = Config::new();
        config.recursive_scan = false;
        config.save().unwrap();

        // The path should be under temp_dir/media-scope/config.toml
        let config_path = Config::config_path().unwrap();
        assert!(config_path.exists());
        assert!(config_path.starts_with(temp_dir.path().join(APP_DIR_NAME)));
        assert_eq!(
            Config::state_path().unwrap(),
            temp_dir.path().join(APP_DIR_NAME).join(STATE_FILE_NAME)
        );

        let loaded = Config::load().unwrap();
        assert!(!loaded.recursive_scan);
        assert_eq!(loaded.log_level, "warn");

        // Clean up - restore original value if it existed
        unsafe {
            if let Some(original) = original_xdg {
                std::env::set_var("XDG_CONFIG_HOME", original);
            } else {
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }
}
