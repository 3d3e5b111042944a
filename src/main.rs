//! # tt - two-level task list
//!
//! Command-line and terminal front-end for the `tasktree` store.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive UI over the example tasks
//! tt ui
//!
//! # Start from nothing and keep a log of every change
//! tt --empty --log-file tt.log ui
//!
//! # Print open tasks mentioning "study"
//! tt list --keyword study --hide-done
//!
//! # Raw JSON of the visible tasks
//! tt list --json
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`). The UI only logs
//! when `--log-file` is given, since stderr shares the terminal with it.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

pub mod cli;
pub mod cmd;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    install_tracing(&cli.command, cli.log_file.as_deref())?;

    let store = initial_store(cli.empty);
    match cli.command {
        Commands::Ui(view) => cmd_ui(store, &view),
        Commands::List { view, json } => cmd_list(&store, &view, json),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

/// Where log output should go for a command.
#[derive(Debug, PartialEq, Eq)]
enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    Off,
}

fn log_target<'a>(command: &Commands, log_file: Option<&'a Path>) -> LogTarget<'a> {
    match (command, log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (Commands::Ui(_), None) | (Commands::Completions { .. }, None) => LogTarget::Off,
        (Commands::List { .. }, None) => LogTarget::Stderr,
    }
}

fn install_tracing(command: &Commands, log_file: Option<&Path>) -> Result<()> {
    // RUST_LOG overrides; default is INFO.
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact();

    match log_target(command, log_file) {
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        LogTarget::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        LogTarget::Off => {}
    }
    Ok(())
}
