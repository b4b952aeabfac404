//! Error types for hub port operations.

use thiserror::Error;

/// Errors from hub port operations.
///
/// These are domain-level errors that consumers can handle.
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum HubPortError {
    /// The repository does not exist (or is hidden from anonymous users).
    #[error("Repository not found: {repo}")]
    RepoNotFound {
        /// The repository that wasn't found
        repo: String,
    },

    /// The requested revision does not exist in the repository.
    #[error("Revision '{revision}' not found in {repo}")]
    RevisionNotFound {
        /// The repository
        repo: String,
        /// The revision that wasn't found
        revision: String,
    },

    /// Authentication required or failed.
    #[error("Authentication required for {repo}")]
    AuthRequired {
        /// The repository that requires auth
        repo: String,
    },

    /// API rate limit exceeded.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Local file could not be written.
    #[error("I/O error on {path}: {message}")]
    Io {
        /// Path being written
        path: String,
        /// Underlying error message
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for hub port operations.
pub type HubPortResult<T> = Result<T, HubPortError>;
