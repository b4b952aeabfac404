//! Repository references.
//!
//! A repository on the Hub is addressed by its kind (model, dataset, space)
//! and an identifier that is either `owner/name` or a bare canonical name.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when parsing repository kinds and identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepoRefError {
    /// Repository identifier was empty.
    #[error("Repository id cannot be empty")]
    EmptyId,

    /// Repository identifier has an invalid shape.
    #[error("Invalid repository id '{0}': expected 'owner/name' or 'name'")]
    InvalidId(String),

    /// Unknown repository kind.
    #[error("Unknown repository type '{0}': expected model, dataset or space")]
    UnknownKind(String),
}

/// Kind of Hub repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepoKind {
    Model,
    #[default]
    Dataset,
    Space,
}

impl RepoKind {
    /// Plural segment used by the JSON API (`/api/datasets/...`).
    pub const fn api_segment(self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::Dataset => "datasets",
            Self::Space => "spaces",
        }
    }

    /// Prefix used by file URLs (`/datasets/<id>/resolve/...`).
    ///
    /// Models live at the root of the Hub namespace and have no prefix.
    pub const fn url_prefix(self) -> &'static str {
        match self {
            Self::Model => "",
            Self::Dataset => "datasets/",
            Self::Space => "spaces/",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Dataset => "dataset",
            Self::Space => "space",
        }
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepoKind {
    type Err = RepoRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "model" | "models" => Ok(Self::Model),
            "dataset" | "datasets" => Ok(Self::Dataset),
            "space" | "spaces" => Ok(Self::Space),
            other => Err(RepoRefError::UnknownKind(other.to_string())),
        }
    }
}

/// Reference to a repository on the Hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    /// Repository kind
    pub kind: RepoKind,
    /// Repository id (`owner/name` or `name`)
    pub id: String,
}

impl RepoRef {
    /// Parse and validate a repository reference.
    pub fn new(kind: RepoKind, id: &str) -> Result<Self, RepoRefError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(RepoRefError::EmptyId);
        }

        let segments: Vec<&str> = id.split('/').collect();
        let valid_shape = segments.len() <= 2
            && segments
                .iter()
                .all(|s| !s.is_empty() && *s != "." && *s != "..");
        if !valid_shape {
            return Err(RepoRefError::InvalidId(id.to_string()));
        }

        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }

    /// Shorthand for a dataset repository.
    pub fn dataset(id: &str) -> Result<Self, RepoRefError> {
        Self::new(RepoKind::Dataset, id)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.url_prefix(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_and_name() {
        let repo = RepoRef::dataset("official-stockfish/fishtest_pgns").unwrap();
        assert_eq!(repo.kind, RepoKind::Dataset);
        assert_eq!(repo.id, "official-stockfish/fishtest_pgns");
        assert_eq!(repo.to_string(), "datasets/official-stockfish/fishtest_pgns");
    }

    #[test]
    fn test_parse_canonical_name() {
        let repo = RepoRef::new(RepoKind::Model, "gpt2").unwrap();
        assert_eq!(repo.to_string(), "gpt2");
    }

    #[test]
    fn test_rejects_bad_ids() {
        assert_eq!(RepoRef::dataset("  "), Err(RepoRefError::EmptyId));
        assert!(matches!(
            RepoRef::dataset("a/b/c"),
            Err(RepoRefError::InvalidId(_))
        ));
        assert!(matches!(
            RepoRef::dataset("owner/"),
            Err(RepoRefError::InvalidId(_))
        ));
        assert!(matches!(
            RepoRef::dataset("../etc"),
            Err(RepoRefError::InvalidId(_))
        ));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("dataset".parse::<RepoKind>(), Ok(RepoKind::Dataset));
        assert_eq!("Models".parse::<RepoKind>(), Ok(RepoKind::Model));
        assert_eq!("space".parse::<RepoKind>(), Ok(RepoKind::Space));
        assert!(matches!(
            "bucket".parse::<RepoKind>(),
            Err(RepoRefError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_kind_segments() {
        assert_eq!(RepoKind::Dataset.api_segment(), "datasets");
        assert_eq!(RepoKind::Model.url_prefix(), "");
        assert_eq!(RepoKind::Space.url_prefix(), "spaces/");
    }
}
