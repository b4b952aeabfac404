#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    DEFAULT_ALLOW_PATTERN, DEFAULT_DATASET_ID, DEFAULT_LOCAL_DIR, DEFAULT_REVISION, RepoKind,
    RepoRef, RepoRefError, SnapshotRequest,
};
pub use paths::{DirectoryCreationStrategy, PathError, ensure_directory, verify_writable};
pub use ports::{
    DatasetHubPort, HubPortError, HubPortResult, ProgressCallback, RemoteFile, TransferProgress,
};

// Silence unused dev-dependency warnings; tempfile is used by path tests
#[cfg(test)]
use tempfile as _;
