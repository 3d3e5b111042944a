//! Command implementations for the CLI interface.
//!
//! Each subcommand builds a store for the session (seeded unless `--empty`),
//! then either hands it to the terminal UI or prints a filtered view of it.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use clap_complete::{generate, Shell};
use tracing::info;

use tasktree::filter::TaskFilter;
use tasktree::store::{format_table, TaskStore};
use tasktree::task::Task;

use crate::cli::Cli;
use crate::tui::run::run_tui;

/// Filter options shared by the list and UI commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Only show tasks whose text contains this (case-sensitive).
    #[arg(long, default_value = "")]
    pub keyword: String,
    /// Hide completed top-level tasks.
    #[arg(long)]
    pub hide_done: bool,
}

impl ViewArgs {
    pub fn to_filter(&self) -> TaskFilter {
        TaskFilter::new(self.keyword.clone(), !self.hide_done)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive UI.
    Ui(ViewArgs),

    /// Print the task list.
    List {
        #[command(flatten)]
        view: ViewArgs,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Build the store a session starts with.
pub fn initial_store(empty: bool) -> TaskStore {
    if empty {
        TaskStore::new()
    } else {
        TaskStore::seeded()
    }
}

/// Launch the TUI over a fresh store.
pub fn cmd_ui(store: TaskStore, view: &ViewArgs) -> Result<()> {
    info!(tasks = store.len(), "starting interactive session");
    run_tui(store, view.to_filter()).context("terminal UI failed")?;
    info!("interactive session ended");
    Ok(())
}

/// Print the visible tasks as a table or as JSON.
pub fn cmd_list(store: &TaskStore, view: &ViewArgs, json: bool) -> Result<()> {
    let filter = view.to_filter();
    let visible = filter.apply(store.tasks());
    let mut out = io::stdout().lock();
    write_list(&mut out, &visible, json)?;
    info!(
        visible = visible.len(),
        total = store.len(),
        "listed tasks"
    );
    Ok(())
}

fn write_list<W: Write>(out: &mut W, visible: &[&Task], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, visible).context("failed to encode tasks")?;
        writeln!(out)?;
    } else if visible.is_empty() {
        writeln!(out, "No matching tasks")?;
    } else {
        write!(out, "{}", format_table(visible))?;
    }
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(store: &TaskStore, view: &ViewArgs, json: bool) -> String {
        let visible = view.to_filter().apply(store.tasks());
        let mut buf = Vec::new();
        write_list(&mut buf, &visible, json).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn list_table_respects_filter() {
        let store = TaskStore::seeded();
        let view = ViewArgs {
            keyword: String::new(),
            hide_done: true,
        };
        let out = render(&store, &view, false);
        assert!(out.contains("Java Silver study"));
        assert!(out.contains("AWS study"));
        assert!(!out.contains("React study"));
    }

    #[test]
    fn list_json_is_task_array() {
        let store = TaskStore::seeded();
        let view = ViewArgs {
            keyword: "AWS".into(),
            hide_done: false,
        };
        let out = render(&store, &view, true);
        let parsed: Vec<Task> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].subtasks.len(), 2);
    }

    #[test]
    fn list_reports_empty_result() {
        let out = render(&initial_store(true), &ViewArgs::default(), false);
        assert_eq!(out, "No matching tasks\n");
    }

    #[test]
    fn initial_store_seeding() {
        assert_eq!(initial_store(false).len(), 4);
        assert!(initial_store(true).is_empty());
    }
}
