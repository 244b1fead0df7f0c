//! Development tasks for the park workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{ReadActions, Replay};

/// Development tasks for the park workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for park action logs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read and inspect action log files
    ReadActions(ReadActions),

    /// Replay an action log against a saved world and print its checksum
    Replay(Replay),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for PARK_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();
    let _guard = park_runtime::logging::init(None)?;

    let cli = Cli::parse();

    match cli.command {
        Command::ReadActions(cmd) => cmd.execute(),
        Command::Replay(cmd) => cmd.execute(),
    }
}
