//! Replay an action log against a saved world
//!
//! Loads a world snapshot, re-executes every logged action through the
//! dispatcher and reports the resulting state checksum. Two peers that ran
//! the same session must print the same checksum.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::collections::BTreeMap;
use std::path::PathBuf;
use strum::IntoEnumIterator;

use park_core::{ExpenditureType, Money};
use park_runtime::{ActionDispatcher, FileWorldRepository, RuntimeConfig};

use super::read_actions::read_log;
use crate::dirs;

/// Replay an action log and print the resulting checksum
#[derive(Parser)]
pub struct Replay {
    /// World snapshot JSON the session started from
    #[arg(value_name = "WORLD")]
    world: PathBuf,

    /// Path to an action log file or the session directory holding it
    #[arg(short, long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Session ID to replay (defaults to the most recent session)
    #[arg(short, long, value_name = "SESSION")]
    session: Option<String>,

    /// Custom data directory (defaults to PARK_DATA_DIR or the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print every action result, not just the totals
    #[arg(short, long)]
    verbose: bool,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let snapshot = FileWorldRepository::read_path(&self.world)
            .with_context(|| format!("Failed to load world: {}", self.world.display()))?;
        let path = dirs::action_log_path(
            self.log.as_deref(),
            self.session.as_deref(),
            self.data_dir.as_deref(),
        )?;
        let entries = read_log(&path)?;

        // Game rules come from the environment, as in the live session.
        let config = RuntimeConfig::from_env();
        let mut dispatcher =
            ActionDispatcher::new(snapshot.state, config.game).with_scenery(snapshot.scenery);
        let initial = dispatcher.checksum()?;

        tracing::info!(actions = entries.len(), log = %path.display(), "replaying");
        let results = dispatcher.replay(&entries)?;

        println!("{} {}", style("World:").bold().cyan(), self.world.display());
        println!("{} {}", style("Action Log:").bold().cyan(), path.display());
        println!("{} {}", style("Actions:").bold().cyan(), entries.len());
        println!("{} {}", style("Final Tick:").bold().cyan(), dispatcher.tick());
        println!();

        if self.verbose {
            println!("{}", style("=== Results ===").bold().green());
            for (entry, result) in entries.iter().zip(&results) {
                let line = format!("#{} @{} {}", entry.sequence, entry.tick, result);
                if result.is_ok() {
                    println!("  {}", line);
                } else {
                    println!("  {}", style(line).red());
                }
            }
            println!();
        }

        let mut statuses = BTreeMap::new();
        for result in &results {
            *statuses.entry(format!("{:?}", result.status)).or_insert(0usize) += 1;
        }
        println!("{}", style("Status Distribution:").bold().yellow());
        for (status, count) in statuses {
            println!("  {}: {}", status, count);
        }
        println!();

        let finance = &dispatcher.state().finance;
        println!("{}", style("Finance:").bold().yellow());
        println!("  cash: {}", finance.cash);
        for kind in ExpenditureType::iter() {
            let spent = finance.spent(kind);
            if spent != Money::ZERO {
                let name: &'static str = kind.into();
                println!("  {}: {}", name, spent);
            }
        }
        println!();

        let checksum = dispatcher.checksum()?;
        println!(
            "{} {}",
            style("Initial Checksum:").bold().cyan(),
            initial.to_hex()
        );
        println!(
            "{} {}",
            style("Final Checksum:").bold().green(),
            checksum.to_hex()
        );

        Ok(())
    }
}
