//! # Configuration Persistence
//!
//! User configuration stored in `~/.config/dlogview/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. Every field has a default, so a partial
//! file is fine. Command-line flags override what is loaded here.
//!
//! ```json
//! {
//!   "theme": "Nord",
//!   "tail": "500",
//!   "timestamps": true,
//!   "all": false,
//!   "log_level": "debug"
//! }
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! and data directories.

use crate::runtime::LogOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APPLICATION: &str = "dlogview";

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Lines of history replayed when a stream opens (`"all"` or a count).
    #[serde(default = "default_tail")]
    pub tail: String,

    /// Ask the daemon to prefix each line with a timestamp.
    #[serde(default)]
    pub timestamps: bool,

    /// List stopped containers as well as running ones.
    #[serde(default)]
    pub all: bool,

    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme_name() -> String {
    "Catppuccin Mocha".to_string()
}

fn default_tail() -> String {
    "all".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            tail: default_tail(),
            timestamps: false,
            all: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_default()
    }

    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Options passed to every log subscription.
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            tail: self.tail.clone(),
            timestamps: self.timestamps,
        }
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.json"))
    }

    /// Directory the log file is written to when none is given.
    pub fn default_log_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_local_dir().join("logs"))
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APPLICATION)
        .context("Could not determine config directory")
}
