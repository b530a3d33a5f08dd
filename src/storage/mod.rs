//! # Storage Layer
//!
//! Reads the inputs of the layout engine from disk.
//!
//! ## File Formats
//!
//! | Data | Format | Default location |
//! |------|--------|------------------|
//! | Config | JSON (or TOML) | `./config.json` |
//! | Tasks | Semicolon-delimited text | `TASK_FILE_PATH` from the config |
//!
//! Both readers fail with typed errors ([`ConfigError`], [`TaskFileError`])
//! wrapped in `anyhow` context naming the offending file.
//!
//! ## Key Types
//!
//! - [`Config`] - Task file location, default display mode, layout overrides
//! - [`TaskFile`] - Reads and validates the task list

mod config;
mod task_file;

pub use config::{Config, ConfigError, ConfigFormat, DEFAULT_CONFIG_FILE};
pub use task_file::{parse_tasks, TaskFile, TaskFileError, REQUIRED_COLUMNS};
