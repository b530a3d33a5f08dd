//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::logging::init_logging;
use super::output::{Output, OutputFormat};
use super::{layout_cmd, tasks};
use crate::domain::Task;
use crate::layout::DisplayMode;
use crate::storage::{Config, ConfigError, TaskFile};

#[derive(Parser)]
#[command(name = "tasklanes")]
#[command(author, version, about = "Swim-lane layout for interdependent project tasks")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./config.json)
    #[arg(long, short = 'c', global = true, env = "TASKLANES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Task file to read instead of the configured TASK_FILE_PATH
    #[arg(long, short = 't', global = true)]
    pub tasks: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tasks as a table
    List,

    /// Show the dependency column of every task
    Columns,

    /// Compute the swim-lane layout
    Layout {
        /// Display mode (defaults to DISPLAY_MODE from the config)
        #[arg(long, short)]
        mode: Option<DisplayMode>,
    },

    /// Report unknown dependencies and dependency cycles
    Check,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);
    init_logging(output.is_verbose())?;

    output.verbose("tasklanes starting");

    let (config, task_list) = load_inputs(cli.config.as_deref(), cli.tasks.as_deref(), &output)?;

    match cli.command {
        Commands::List => tasks::list(&output, &task_list),
        Commands::Columns => tasks::columns(&output, &task_list),
        Commands::Layout { mode } => {
            let mode = mode.unwrap_or(config.display_mode);
            output.verbose_ctx(
                "layout",
                &format!("Laying out {} tasks in {} mode", task_list.len(), mode),
            );
            layout_cmd::run(&output, &config, &task_list, mode)
        }
        Commands::Check => tasks::check(&output, &task_list),
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Loads the configuration and the task list
///
/// With an explicit task file the configuration is optional: a missing
/// default `config.json` falls back to defaults, while a missing file passed
/// with `--config` is still an error. `TASK_FILE_PATH` is only required when
/// no task file is given.
fn load_inputs(
    config_path: Option<&Path>,
    tasks_path: Option<&Path>,
    output: &Output,
) -> Result<(Config, Vec<Task>)> {
    let config = match (Config::locate(config_path), tasks_path) {
        (Ok(path), _) => {
            output.verbose_ctx("config", &format!("Reading configuration: {}", path.display()));
            Config::load(&path)?
        }
        (Err(ConfigError::NotFound(_)), Some(_)) if config_path.is_none() => {
            output.verbose_ctx("config", "No configuration file, using defaults");
            Config::default()
        }
        (Err(e), _) => return Err(e.into()),
    };

    // An explicit task file makes TASK_FILE_PATH optional
    let task_path = match tasks_path {
        Some(path) => path.to_path_buf(),
        None => config.task_file()?,
    };
    output.verbose_ctx("tasks", &format!("Reading tasks: {}", task_path.display()));

    let task_list = TaskFile::new(task_path).read_all()?;
    output.verbose_ctx("tasks", &format!("Loaded {} tasks", task_list.len()));

    Ok((config, task_list))
}
