//! Command-line interface for spinner_xo.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spinner XO - spin the wheel, place your mark
#[derive(Parser, Debug)]
#[command(name = "spinner_xo")]
#[command(about = "Party-game companion for team tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it does not exist)
    #[arg(long, global = true, default_value = "spinner_xo.toml")]
    pub config: PathBuf,

    /// Directory holding the saved roster (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log file for the terminal game
    #[arg(long, global = true, default_value = "spinner_xo.log")]
    pub log_file: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play,

    /// Print the saved roster and settings
    Show,

    /// Delete the saved roster and settings
    Reset,
}
