#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; tempfile is used by the integration tests
#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use dotenvy as _;
use tokio as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::Commands;
pub use error::{CliError, exit_code};
pub use parser::Cli;
