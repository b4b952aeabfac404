//! Error types for loading score tables and rendering plots.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for plot operations.
pub type PlotResult<T> = Result<T, PlotError>;

/// Errors that can occur while producing a scatter plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Reading the input or writing the output failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value in the input table is not a number.
    #[error("line {line}: could not convert '{value}' to float")]
    InvalidNumber { line: usize, value: String },

    /// A row has a different number of columns than the first row.
    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The input is not UTF-8 text.
    #[error("line {line}: input is not valid UTF-8 text")]
    NotUtf8 { line: usize },

    /// The table has fewer than the two required columns.
    #[error("line {line}: expected at least 2 columns, found {found}")]
    TooFewColumns { line: usize, found: usize },

    /// The configuration cannot produce an image.
    #[error("Invalid plot configuration: {message}")]
    InvalidConfig { message: String },

    /// The embedded font could not be loaded.
    #[error("Failed to load embedded font")]
    Font,

    /// The drawing backend reported an error.
    #[error("Rendering failed: {message}")]
    Render { message: String },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

impl PlotError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn render(err: impl std::fmt::Display) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }

    /// True for errors caused by the content of the input table.
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber { .. }
                | Self::RaggedRow { .. }
                | Self::TooFewColumns { .. }
                | Self::NotUtf8 { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_line_numbers() {
        let err = PlotError::InvalidNumber {
            line: 7,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "line 7: could not convert 'abc' to float");
        assert!(err.is_data_error());

        let err = PlotError::RaggedRow {
            line: 3,
            expected: 2,
            found: 3,
        };
        assert!(err.to_string().starts_with("line 3:"));

        let err = PlotError::NotUtf8 { line: 4 };
        assert_eq!(err.to_string(), "line 4: input is not valid UTF-8 text");
        assert!(err.is_data_error());
    }

    #[test]
    fn test_io_is_not_data_error() {
        let err = PlotError::io(
            std::path::Path::new("score_pairs.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(!err.is_data_error());
        assert!(err.to_string().contains("score_pairs.txt"));
    }
}
