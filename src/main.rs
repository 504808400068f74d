//! Spinner XO - terminal front end.
//!
//! Runs the turn-flow controller in the terminal, or inspects and clears
//! the saved roster.

#![warn(missing_docs)]

mod cli;
mod tui;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use spinner_xo::{AppConfig, FileStore, Mark, RosterRecord, RosterStore};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play => {
            init_file_tracing(&cli.log_file)?;
            let config = load_config(&cli.config, cli.data_dir)?;
            tui::run_tui(config).await
        }
        Command::Show => {
            init_stderr_tracing();
            let config = load_config(&cli.config, cli.data_dir)?;
            show_roster(&config);
            Ok(())
        }
        Command::Reset => {
            init_stderr_tracing();
            let config = load_config(&cli.config, cli.data_dir)?;
            reset_roster(&config)
        }
    }
}

/// Loads the config file and applies command-line overrides.
#[instrument(skip(data_dir))]
fn load_config(path: &Path, data_dir: Option<std::path::PathBuf>) -> Result<AppConfig> {
    let config = AppConfig::load_or_default(path)?;
    Ok(match data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "Overriding data directory");
            config.with_data_dir(dir)
        }
        None => config,
    })
}

/// Prints the stored roster to stdout.
#[instrument(skip(config))]
fn show_roster(config: &AppConfig) {
    let store = RosterStore::new(FileStore::new(config.data_dir()));
    let record = store.load(RosterRecord::default());

    for mark in Mark::iter() {
        let names: Vec<&str> = record.team(mark).map(|p| p.name().as_str()).collect();
        println!("Team {} ({}): {}", mark, names.len(), names.join(", "));
    }
    println!(
        "Avoid repeat: {}",
        if record.settings().avoid_repeat { "on" } else { "off" }
    );
    match record
        .effective_last_picked()
        .and_then(|id| record.find(id))
    {
        Some(player) => println!("Last picked: {}", player.name()),
        None => println!("Last picked: -"),
    }
}

/// Deletes the stored roster.
#[instrument(skip(config))]
fn reset_roster(config: &AppConfig) -> Result<()> {
    let mut store = RosterStore::new(FileStore::new(config.data_dir()));
    store.clear()?;
    println!("Saved roster cleared.");
    Ok(())
}

/// Logs to a file so the terminal UI is not disturbed.
fn init_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
