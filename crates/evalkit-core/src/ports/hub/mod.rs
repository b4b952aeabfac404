//! Hub port definitions.
//!
//! This module defines the port trait and DTOs for fetching files from a
//! remote repository host. The actual implementation lives in `evalkit-hf`.

mod client;
mod error;
mod progress;
mod types;

pub use client::DatasetHubPort;
pub use error::{HubPortError, HubPortResult};
pub use progress::{ProgressCallback, TransferProgress};
pub use types::RemoteFile;
