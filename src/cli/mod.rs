//! Command-line interface for todo
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule; the task service is
//! built once in `Cli::run` and lent to whichever command runs.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::output::OutputOptions;
use crate::service::TaskService;
use crate::storage::FileStorage;

pub mod complete;
pub mod create;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod ui;

/// todo - a small task tracker for the terminal
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true, propagate_version = true)]
pub struct Cli {
    /// Directory holding the task files
    #[arg(long, global = true, env = "TODO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long, global = true, env = "TODO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print version
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a task
    Create {
        /// Task description; multiple words are joined with spaces
        #[arg(required = true, allow_negative_numbers = true)]
        description: Vec<String>,
    },

    /// List tasks, newest first
    List {
        /// Only completed tasks
        #[arg(long, conflicts_with = "incomplete")]
        completed: bool,

        /// Only incomplete tasks
        #[arg(long)]
        incomplete: bool,
    },

    /// Mark a task as completed
    Complete {
        /// Task ID
        id: String,

        /// Flip the current state instead of forcing completed
        #[arg(long)]
        toggle: bool,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Export every task
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format (default from config, else json)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Import tasks from an export file
    Import {
        /// Export file to read
        file: PathBuf,

        /// Keep existing tasks and add only unseen IDs
        #[arg(long)]
        merge: bool,
    },

    /// Open the interactive terminal UI
    Ui,
}

impl Cli {
    /// Execute the parsed command
    pub fn run(self) -> Result<()> {
        let Some(command) = self.command else {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        };

        let config = Config::load_or_default(self.config.as_deref());
        let storage = FileStorage::from_config(&config, self.data_dir.as_deref());
        tracing::debug!(dir = %storage.dir().display(), "using data directory");
        let mut service = TaskService::new(storage);

        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match command {
            Commands::Create { description } => create::run(
                &mut service,
                create::Options {
                    description: description.join(" "),
                    output,
                },
            ),
            Commands::List {
                completed,
                incomplete,
            } => list::run(
                &service,
                list::Options {
                    filter: list::filter_from_flags(completed, incomplete),
                    output,
                },
            ),
            Commands::Complete { id, toggle } => {
                complete::run(&mut service, complete::Options { id, toggle, output })
            }
            Commands::Delete { id } => delete::run(&mut service, delete::Options { id, output }),
            Commands::Export { file, format } => export::run(
                &service,
                export::Options {
                    file,
                    format: format.unwrap_or(config.export.format),
                    output,
                },
            ),
            Commands::Import { file, merge } => {
                import::run(&mut service, import::Options { file, merge, output })
            }
            Commands::Ui => ui::run(&mut service),
        }
    }
}

/// Turn a clap usage error into an `InvalidArgument` for the JSON error
/// envelope. Keeps the message block and drops the usage and help hints.
pub fn usage_error(err: &clap::Error) -> Error {
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let message = message.strip_prefix("error: ").unwrap_or(&message);
    Error::InvalidArgument(message.to_string())
}
