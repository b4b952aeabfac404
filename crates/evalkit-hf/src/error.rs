//! Internal error types for Hub operations.
//!
//! These errors are mapped to core port errors at the boundary (`port.rs`).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Hub operations.
pub type HfResult<T> = Result<T, HfError>;

/// Errors related to Hub API operations.
#[derive(Debug, Error)]
pub enum HfError {
    /// Request failed with an HTTP error status.
    #[error("HuggingFace request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Value of the `X-Error-Code` header, if any (e.g. `RepoNotFound`)
        error_code: Option<String>,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from HuggingFace API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Writing a downloaded file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl HfError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
