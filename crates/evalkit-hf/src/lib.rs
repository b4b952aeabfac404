#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultHfClient is meant to be used
// through the DatasetHubPort trait, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod token;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultHfClient;

// Configuration
pub use config::{DEFAULT_ENDPOINT, HubClientConfig};

// Errors (for callers constructing the client)
pub use error::{HfError, HfResult};

// Token discovery
pub use token::{TOKEN_ENV, resolve_token};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
