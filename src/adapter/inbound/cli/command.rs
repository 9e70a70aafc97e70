//! Command-line interface definitions.
//!
//! Defines the CLI structure for the conductor binary using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Trading-session orchestrator
#[derive(Parser, Debug)]
#[command(name = "conductor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the conductor CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a trading session until interrupted (Ctrl-C)
    Run(RunArgs),

    /// Validate a configuration file and print what it enables
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}
