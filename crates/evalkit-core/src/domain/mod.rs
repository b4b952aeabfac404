//! Domain types shared across evalkit crates.

mod repo;
mod snapshot;

pub use repo::{RepoKind, RepoRef, RepoRefError};
pub use snapshot::{
    DEFAULT_ALLOW_PATTERN, DEFAULT_DATASET_ID, DEFAULT_LOCAL_DIR, DEFAULT_REVISION,
    SnapshotRequest,
};
