//! Errors for the local directory a snapshot is mirrored into.

use std::path::PathBuf;
use thiserror::Error;

/// Why a local directory cannot be used as a destination.
#[derive(Debug, Error)]
pub enum PathError {
    /// Something other than a directory sits at the destination path.
    #[error("Destination {0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// The destination is missing and may not be created.
    #[error("Destination directory {0} does not exist")]
    DirectoryNotFound(PathBuf),

    #[error("Cannot create destination directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// A probe file could not be created in the destination.
    #[error("Destination directory {path} is not writable: {reason}")]
    NotWritable { path: PathBuf, reason: String },

    #[error("Destination path is empty")]
    EmptyPath,
}
