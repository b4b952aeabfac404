//! Error types for snapshot fetching.

use std::path::PathBuf;

use evalkit_core::{HubPortError, PathError};
use thiserror::Error;

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while planning or performing a fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An allow or ignore pattern is not a valid glob.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Parser error
        #[source]
        source: globset::Error,
    },

    /// The remote listing contained a path that cannot be mirrored safely.
    #[error("Refusing to write remote path '{path}' outside the local directory")]
    UnsafeRemotePath {
        /// Remote relative path as listed
        path: String,
    },

    /// The local directory is unusable.
    #[error(transparent)]
    LocalDir(#[from] PathError),

    /// The hub rejected a request or could not be reached.
    #[error(transparent)]
    Hub(#[from] HubPortError),

    /// The transfer ended with a different number of bytes than listed.
    #[error("Size mismatch for '{path}': expected {expected} bytes, got {actual} bytes")]
    SizeMismatch {
        /// Remote relative path
        path: String,
        expected: u64,
        actual: u64,
    },

    /// A local filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A blocking filesystem task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FetchError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
