//! Read and inspect action log files from persistence layer
//!
//! Decodes `actions.log` frames and displays their contents.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use park_core::GameCommand;
use park_runtime::{ACTION_LOG_FILE, ActionLogEntry, ActionRepository, FileActionLog};

use crate::dirs;

/// Read and inspect action log files
#[derive(Parser)]
pub struct ReadActions {
    /// Path to an action log file or the session directory holding it
    #[arg(value_name = "PATH")]
    log: Option<PathBuf>,

    /// Session ID to read actions from (e.g., session_1762685005)
    /// If not provided, uses the most recent session
    #[arg(short, long, value_name = "SESSION")]
    session: Option<String>,

    /// Custom data directory (defaults to PARK_DATA_DIR or the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Limit number of actions to display (0 = unlimited)
    #[arg(short, long, default_value = "100")]
    limit: usize,

    /// Skip first N actions
    #[arg(long, default_value = "0")]
    skip: usize,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (command types and counts)
    Summary,
    /// One line per action with its decoded parameters
    List,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

/// JSON view of one entry.
#[derive(serde::Serialize)]
struct EntryView {
    sequence: u64,
    tick: u32,
    command: Option<GameCommand>,
    action: String,
    payload: String,
}

impl ReadActions {
    pub fn execute(self) -> Result<()> {
        let path = dirs::action_log_path(
            self.log.as_deref(),
            self.session.as_deref(),
            self.data_dir.as_deref(),
        )?;
        let entries = read_log(&path)?;

        println!("{} {}", style("Action Log:").bold().cyan(), path.display());
        println!(
            "{} {}",
            style("Total Actions:").bold().cyan(),
            entries.len()
        );
        println!();

        let entries: Vec<_> = entries
            .into_iter()
            .skip(self.skip)
            .take(if self.limit == 0 {
                usize::MAX
            } else {
                self.limit
            })
            .collect();

        if self.skip > 0 {
            println!("{} {}", style("Skipped:").bold().cyan(), self.skip);
        }
        if self.limit > 0 && entries.len() == self.limit {
            println!("{} {}", style("Showing:").bold().cyan(), entries.len());
            println!();
        }

        match self.format {
            OutputFormat::Summary => print_summary(&entries),
            OutputFormat::List => print_list(&entries),
            OutputFormat::Json => print_json(&entries)?,
            OutputFormat::Debug => print_debug(&entries),
        }

        Ok(())
    }
}

/// Reads every frame of the action log at `path`.
pub(crate) fn read_log(path: &Path) -> Result<Vec<ActionLogEntry>> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(ACTION_LOG_FILE);

    let log = FileActionLog::open_or_create(dir, filename)
        .with_context(|| format!("Failed to open action log: {}", path.display()))?;
    log.read_all()
        .with_context(|| format!("Failed to read action log: {}", path.display()))
}

fn command_name(entry: &ActionLogEntry) -> String {
    entry
        .command()
        .map(|command| command.to_string())
        .unwrap_or_else(|| format!("unknown({})", entry.command))
}

fn print_summary(entries: &[ActionLogEntry]) {
    println!("{}", style("=== Action Summary ===").bold().green());
    println!();

    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(command_name(entry)).or_insert(0usize) += 1;
    }

    // Sort by count (descending)
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    println!("{}", style("Command Distribution:").bold().yellow());
    for (command, count) in counts {
        println!("  {}: {}", command, count);
    }
    println!();

    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        println!("{}", style("Tick Range:").bold().yellow());
        println!("  First: {} (#{})", first.tick, first.sequence);
        println!("  Last: {} (#{})", last.tick, last.sequence);
        println!();
    }
}

fn print_list(entries: &[ActionLogEntry]) {
    println!("{}", style("=== Action List ===").bold().green());
    println!();

    for entry in entries {
        let action = match entry.decode() {
            Ok(action) => action.describe(),
            Err(err) => style(format!("<{err}>")).red().to_string(),
        };
        println!(
            "{} {} {} {}: {}",
            style("#").bold(),
            entry.sequence,
            style(format!("@{}", entry.tick)).dim(),
            style(command_name(entry)).cyan(),
            action
        );
    }
}

fn print_json(entries: &[ActionLogEntry]) -> Result<()> {
    let views: Vec<_> = entries
        .iter()
        .map(|entry| EntryView {
            sequence: entry.sequence,
            tick: entry.tick,
            command: entry.command(),
            action: entry
                .decode()
                .map(|action| action.describe())
                .unwrap_or_else(|err| format!("<{err}>")),
            payload: hex::encode(&entry.payload),
        })
        .collect();
    let json = serde_json::to_string_pretty(&views).context("Failed to serialize actions to JSON")?;
    println!("{}", json);
    Ok(())
}

fn print_debug(entries: &[ActionLogEntry]) {
    for entry in entries {
        match entry.decode() {
            Ok(action) => println!("#{} @{} {:#?}", entry.sequence, entry.tick, action),
            Err(err) => println!("#{} @{} <{err}>", entry.sequence, entry.tick),
        }
    }
}
