//! Command handlers.
//!
//! Handlers are thin wrappers that:
//! 1. Turn CLI arguments into library requests
//! 2. Call the library crates
//! 3. Format output for the terminal
//!
//! Library errors are converted into [`CliError`](crate::CliError) so the
//! entry point can pick the exit code.

pub mod fetch;
pub mod plot;
