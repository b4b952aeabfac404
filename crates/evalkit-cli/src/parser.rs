//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for mirroring fishtest games and plotting
/// evaluation comparisons.
#[derive(Parser)]
#[command(name = "evalkit")]
#[command(about = "Fetch fishtest PGN archives and plot rescored evaluations")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
