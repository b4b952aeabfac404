//! Snapshot download request.
//!
//! Describes which files of a remote repository to mirror and where to put
//! them. Free of any dependency on clap or the HTTP adapter.

use std::path::PathBuf;

use super::repo::RepoRef;

/// Dataset mirrored by default: the fishtest PGN archive.
pub const DEFAULT_DATASET_ID: &str = "official-stockfish/fishtest_pgns";

/// Default selection: every PGN of the April 2025 runs.
pub const DEFAULT_ALLOW_PATTERN: &str = "25-04-*/*/*.pgn.gz";

/// Default local mirror directory.
pub const DEFAULT_LOCAL_DIR: &str = "./pgns";

/// Default revision (branch, tag or commit).
pub const DEFAULT_REVISION: &str = "main";

/// Request to mirror part of a repository into a local directory.
#[derive(Debug, Clone)]
pub struct SnapshotRequest {
    /// Repository to fetch from.
    pub repo: RepoRef,
    /// Revision to resolve before listing (branch, tag or commit sha).
    pub revision: String,
    /// A file is selected when it matches at least one of these.
    pub allow_patterns: Vec<String>,
    /// A selected file is dropped again when it matches any of these.
    pub ignore_patterns: Vec<String>,
    /// Root of the local mirror.
    pub local_dir: PathBuf,
    /// Re-download files even when the local copy is up to date.
    pub force: bool,
}

impl SnapshotRequest {
    /// Create a request for a single allow pattern on `main`.
    pub fn new(repo: RepoRef, allow_pattern: impl Into<String>, local_dir: PathBuf) -> Self {
        Self {
            repo,
            revision: DEFAULT_REVISION.to_string(),
            allow_patterns: vec![allow_pattern.into()],
            ignore_patterns: Vec::new(),
            local_dir,
            force: false,
        }
    }

    /// Replace the allow patterns.
    #[must_use]
    pub fn with_allow_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ignore patterns.
    #[must_use]
    pub fn with_ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the revision to fetch.
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Set whether to force re-download.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
