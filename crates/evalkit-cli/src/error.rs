//! CLI-specific error types and mappings.
//!
//! Library errors are folded into [`CliError`], which decides the process
//! exit code. The message is the underlying error's own text.

use evalkit_core::{HubPortError, PathError, RepoRefError};
use evalkit_fetch::FetchError;
use evalkit_hf::HfError;
use evalkit_plot::PlotError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid arguments or configuration.
    #[error("{0}")]
    Arguments(String),

    /// The remote repository, revision or service is unavailable.
    #[error("{0}")]
    Unavailable(String),

    /// Reading or writing a local file failed.
    #[error("{0}")]
    Io(String),

    /// Input data is malformed.
    #[error("{0}")]
    Data(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2,
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Data(_) => 65,        // EX_DATAERR
            Self::Other(_) => 1,
        }
    }
}

/// Exit code for an error returned by a handler.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

impl From<RepoRefError> for CliError {
    fn from(err: RepoRefError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<HfError> for CliError {
    fn from(err: HfError) -> Self {
        match err {
            HfError::InvalidUrl(_) => Self::Arguments(err.to_string()),
            HfError::Network(_) => Self::Unavailable(err.to_string()),
            _ => Self::Other(err.to_string()),
        }
    }
}

impl From<HubPortError> for CliError {
    fn from(err: HubPortError) -> Self {
        match err {
            HubPortError::RepoNotFound { .. }
            | HubPortError::RevisionNotFound { .. }
            | HubPortError::AuthRequired { .. }
            | HubPortError::RateLimited
            | HubPortError::Network { .. }
            | HubPortError::InvalidResponse { .. } => Self::Unavailable(err.to_string()),
            HubPortError::Io { .. } => Self::Io(err.to_string()),
            HubPortError::Configuration { .. } => Self::Arguments(err.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::EmptyPath => Self::Arguments(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<FetchError> for CliError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidPattern { .. } => Self::Arguments(err.to_string()),
            FetchError::Hub(hub) => hub.into(),
            FetchError::LocalDir(path) => path.into(),
            FetchError::UnsafeRemotePath { .. } | FetchError::SizeMismatch { .. } => {
                Self::Unavailable(err.to_string())
            }
            FetchError::Io { .. } => Self::Io(err.to_string()),
            FetchError::Task(_) => Self::Other(err.to_string()),
        }
    }
}

impl From<PlotError> for CliError {
    fn from(err: PlotError) -> Self {
        if err.is_data_error() {
            return Self::Data(err.to_string());
        }
        match err {
            PlotError::Io { .. } => Self::Io(err.to_string()),
            PlotError::InvalidConfig { .. } => Self::Arguments(err.to_string()),
            _ => Self::Other(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments(String::new()).exit_code(), 2);
        assert_eq!(CliError::Unavailable(String::new()).exit_code(), 69);
        assert_eq!(CliError::Io(String::new()).exit_code(), 74);
        assert_eq!(CliError::Data(String::new()).exit_code(), 65);
        assert_eq!(CliError::Other(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_missing_repo_is_unavailable() {
        let err: CliError = FetchError::Hub(HubPortError::RepoNotFound {
            repo: "datasets/org/missing".to_string(),
        })
        .into();

        assert_eq!(err.exit_code(), 69);
        assert_eq!(err.to_string(), "Repository not found: datasets/org/missing");
    }

    #[test]
    fn test_unwritable_dir_is_io() {
        let err: CliError = FetchError::LocalDir(PathError::NotWritable {
            path: PathBuf::from("/readonly"),
            reason: "permission denied".to_string(),
        })
        .into();

        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn test_plot_error_mapping() {
        let data: CliError = PlotError::InvalidNumber {
            line: 3,
            value: "x".to_string(),
        }
        .into();
        assert_eq!(data.exit_code(), 65);
        assert!(data.to_string().contains("line 3"));

        let text: CliError = PlotError::NotUtf8 { line: 5 }.into();
        assert_eq!(text.exit_code(), 65);

        let io: CliError = PlotError::Io {
            path: PathBuf::from("score_pairs.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert_eq!(io.exit_code(), 74);
    }

    #[test]
    fn test_anyhow_exit_code() {
        let err = anyhow::Error::new(CliError::Data("bad".to_string()));
        assert_eq!(exit_code(&err), 65);

        let err = anyhow::anyhow!("unclassified");
        assert_eq!(exit_code(&err), 1);
    }
}
