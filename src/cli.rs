use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Two-level task list manager.
/// Every session starts from the built-in example tasks; nothing is saved.
#[derive(Parser, Debug)]
#[command(name = "tt", version, about = "Task list with subtasks and derived completion")]
pub struct Cli {
    /// Start from an empty list instead of the example tasks.
    #[arg(long, global = true)]
    pub empty: bool,

    /// Write logs to this file. Without it the UI does not log.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
