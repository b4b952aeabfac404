//! Port definitions (traits) for external collaborators.
//!
//! Ports are owned by core; adapters such as `evalkit-hf` implement them.

pub mod hub;

pub use hub::{
    DatasetHubPort, HubPortError, HubPortResult, ProgressCallback, RemoteFile, TransferProgress,
};
