//! Layout of a local mirror directory.
//!
//! ```text
//! <root>/<remote path>                                       mirrored file
//! <root>/.cache/huggingface/.gitignore                       "*"
//! <root>/.cache/huggingface/download/<remote path>.metadata  sha, etag, timestamp
//! <root>/.cache/huggingface/download/<remote path>.incomplete
//! ```
//!
//! The layout matches `huggingface-cli download --local-dir`, so a mirror can
//! be shared with the Python tooling.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};

const CACHE_DIR: &str = ".cache/huggingface";
const DOWNLOAD_DIR: &str = "download";
const METADATA_SUFFIX: &str = ".metadata";
const INCOMPLETE_SUFFIX: &str = ".incomplete";

/// Metadata recorded after a file was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    /// Commit the file was fetched from
    pub commit_sha: String,
    /// Content identifier at that commit
    pub etag: String,
    /// Unix time (seconds) the metadata was written
    pub timestamp: f64,
}

impl FileMetadata {
    fn parse(content: &str) -> Option<Self> {
        let mut lines = content.lines();
        let commit_sha = lines.next()?.trim().to_string();
        let etag = lines.next()?.trim().to_string();
        let timestamp = lines.next()?.trim().parse::<f64>().ok()?;
        if commit_sha.is_empty() || etag.is_empty() || !timestamp.is_finite() {
            return None;
        }
        Some(Self {
            commit_sha,
            etag,
            timestamp,
        })
    }

    fn render(&self) -> String {
        format!("{}\n{}\n{}\n", self.commit_sha, self.etag, self.timestamp)
    }
}

/// A local directory mirroring part of a remote repository.
#[derive(Debug, Clone)]
pub struct LocalMirror {
    root: PathBuf,
}

impl LocalMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the bookkeeping files.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    /// Where a remote file lives inside the mirror.
    ///
    /// Rejects paths that would escape the mirror root.
    pub fn local_path(&self, remote_path: &str) -> FetchResult<PathBuf> {
        Ok(self.root.join(relative_path(remote_path)?))
    }

    /// Metadata file recording the fetched commit and etag of `remote_path`.
    pub fn metadata_path(&self, remote_path: &str) -> FetchResult<PathBuf> {
        self.download_path(remote_path, METADATA_SUFFIX)
    }

    /// Temporary destination used while `remote_path` is transferred.
    pub fn incomplete_path(&self, remote_path: &str) -> FetchResult<PathBuf> {
        self.download_path(remote_path, INCOMPLETE_SUFFIX)
    }

    fn download_path(&self, remote_path: &str, suffix: &str) -> FetchResult<PathBuf> {
        let mut path = self
            .cache_dir()
            .join(DOWNLOAD_DIR)
            .join(relative_path(remote_path)?)
            .into_os_string();
        path.push(suffix);
        Ok(PathBuf::from(path))
    }

    /// Create the bookkeeping directory and its `.gitignore`.
    pub fn ensure_cache_dir(&self) -> FetchResult<()> {
        let cache_dir = self.cache_dir();
        fs::create_dir_all(&cache_dir).map_err(|e| FetchError::io(&cache_dir, e))?;

        let gitignore = cache_dir.join(".gitignore");
        if !gitignore.exists() {
            fs::write(&gitignore, "*").map_err(|e| FetchError::io(&gitignore, e))?;
        }
        Ok(())
    }

    /// Read the metadata of `remote_path`.
    ///
    /// Missing or unreadable metadata is `None`: the file is then treated as
    /// not yet fetched.
    pub fn read_metadata(&self, remote_path: &str) -> Option<FileMetadata> {
        let path = self.metadata_path(remote_path).ok()?;
        let content = fs::read_to_string(&path).ok()?;
        let metadata = FileMetadata::parse(&content);
        if metadata.is_none() {
            warn!(path = %path.display(), "ignoring malformed download metadata");
        }
        metadata
    }

    /// Record that `remote_path` was fetched at `commit_sha` with `etag`.
    pub fn write_metadata(&self, remote_path: &str, commit_sha: &str, etag: &str) -> FetchResult<()> {
        let path = self.metadata_path(remote_path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
        }

        let metadata = FileMetadata {
            commit_sha: commit_sha.to_string(),
            etag: etag.to_string(),
            timestamp: unix_seconds(Utc::now()),
        };
        fs::write(&path, metadata.render()).map_err(|e| FetchError::io(&path, e))?;
        debug!(file = remote_path, "wrote download metadata");
        Ok(())
    }
}

/// Convert a `/`-separated remote path to a relative local path.
fn relative_path(remote_path: &str) -> FetchResult<PathBuf> {
    let unsafe_path = || FetchError::UnsafeRemotePath {
        path: remote_path.to_string(),
    };

    let mut path = PathBuf::new();
    for segment in remote_path.split('/') {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains('\\')
            || segment.contains(':')
        {
            return Err(unsafe_path());
        }
        path.push(segment);
    }
    if path.as_os_str().is_empty() {
        return Err(unsafe_path());
    }
    Ok(path)
}

/// Seconds since the unix epoch, with sub-second precision.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_micros()) / 1_000_000.0
}
