//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/kapoview/config.toml`

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::RangeFallback;

/// Main configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Table option persistence
    pub storage: StorageConfig,
    /// Selection model behaviour
    pub selection: SelectionConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// Where and when table options are written
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// State file path (default: `<data dir>/kapoview/table_options.json`)
    pub state_file: Option<PathBuf>,
    /// Save after every change
    pub autosave: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: None,
            autosave: true,
        }
    }
}

/// Selection settings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Shift-click with an unknown anchor: "single" or "ignore"
    pub range_fallback: RangeFallback,
}

/// Logging settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl ConfigFile {
    /// Get the config directory path (~/.config/kapoview)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kapoview"))
    }

    /// Get the config file path (~/.config/kapoview/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> crate::error::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }
}
