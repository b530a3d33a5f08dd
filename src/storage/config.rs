//! Configuration handling for tasklanes
//!
//! Configuration is read from `config.json` (or a TOML file with the same
//! keys) in the working directory, or from `~/.config/tasklanes/`.
//!
//! ```json
//! {
//!   "TASK_FILE_PATH": "tasks.csv",
//!   "DISPLAY_MODE": "compressed",
//!   "LAYOUT": { "box_width": 240 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layout::{DisplayMode, LayoutMetrics};

/// Name of the configuration file looked up by default
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported configuration file type: '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("TASK_FILE_PATH attribute not found in configuration")]
    MissingTaskFile,

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Configuration file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Determines the format from a file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some(other) => Err(ConfigError::UnsupportedFormat(format!(".{}", other))),
            None => Err(ConfigError::UnsupportedFormat(String::new())),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    /// Path of the semicolon-delimited task file
    #[serde(default)]
    pub task_file_path: PathBuf,

    /// Display mode used when none is given on the command line
    #[serde(default)]
    pub display_mode: DisplayMode,

    /// Overrides for the layout spacing constants
    #[serde(default)]
    pub layout: LayoutMetrics,

    /// Directory relative task file paths are resolved against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Config {
    /// Parses configuration text
    ///
    /// `TASK_FILE_PATH` may be absent here; it is only required once the task
    /// file is resolved through [`Config::task_file`].
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Config = match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };

        Ok(config)
    }

    /// Loads configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration: {}", path.display()))?;

        let mut config = Self::parse(&content, format)
            .with_context(|| format!("Invalid configuration: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        debug!(
            path = %path.display(),
            task_file = %config.task_file_path.display(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Finds the configuration file to use
    ///
    /// An explicit path wins; otherwise `./config.json`, then `config.json` or
    /// `config.toml` in the global config directory.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return if path.exists() {
                Ok(path.to_path_buf())
            } else {
                Err(ConfigError::NotFound(path.to_path_buf()))
            };
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Ok(local);
        }

        if let Some(dir) = Self::global_config_dir() {
            for name in [DEFAULT_CONFIG_FILE, "config.toml"] {
                let candidate = dir.join(name);
                if candidate.exists() {
                    return Ok(candidate);
                }
            }
        }

        Err(ConfigError::NotFound(local))
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "tasklanes", "tasklanes")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the task file path, resolved against the config file's directory
    pub fn task_file(&self) -> Result<PathBuf, ConfigError> {
        if self.task_file_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingTaskFile);
        }

        Ok(match &self.base_dir {
            Some(base) if self.task_file_path.is_relative() => base.join(&self.task_file_path),
            _ => self.task_file_path.clone(),
        })
    }
}
