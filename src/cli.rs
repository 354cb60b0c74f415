//! Command-line interface for strictly_gridtoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Gridtoe - N×N tic-tac-toe server with a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_gridtoe")]
#[command(about = "N×N tic-tac-toe game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
