//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list` | Task table as read from the task file |
//! | `columns` | Dependency column per task |
//! | `layout` | Swim-lane geometry (`--mode normal\|compressed`) |
//! | `check` | Unknown dependencies and cycles |
//!
//! ## Inputs
//!
//! Tasks come from `TASK_FILE_PATH` in `config.json`, or from `--tasks`.
//! Use `--config` to point at another configuration file.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! tasklanes --verbose layout
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod layout_cmd;
mod logging;
mod output;
mod tasks;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
