//! Deciding which remote files need a transfer.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use evalkit_core::RemoteFile;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::mirror::{LocalMirror, unix_seconds};

/// Tolerance between a file's mtime and its metadata timestamp.
const MTIME_TOLERANCE_SECS: f64 = 1.0;

/// What a fetch will do with one remote file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchAction {
    /// Transfer the file (missing, changed or forced).
    Download,
    /// The local copy already matches the remote file.
    UpToDate,
}

/// One selected remote file and its fate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub file: RemoteFile,
    /// Final location inside the local directory
    pub local_path: PathBuf,
    pub action: FetchAction,
    /// The local copy was verified by content hash; its metadata must be
    /// rewritten.
    pub refresh_metadata: bool,
}

/// Result of planning a snapshot fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// Commit the requested revision resolved to
    pub commit_sha: String,
    pub local_dir: PathBuf,
    /// Selected files, in listing order
    pub entries: Vec<PlanEntry>,
}

impl FetchPlan {
    /// Entries that require a transfer.
    pub fn downloads(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.action == FetchAction::Download)
    }

    /// Number of entries already up to date.
    pub fn up_to_date_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.action == FetchAction::UpToDate)
            .count()
    }

    /// Bytes that a fetch of this plan would transfer.
    pub fn download_bytes(&self) -> u64 {
        self.downloads().map(|entry| entry.file.size).sum()
    }
}

/// Summary of a completed fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub commit_sha: String,
    pub local_dir: PathBuf,
    /// Remote paths transferred in this run
    pub downloaded: Vec<String>,
    /// Remote paths whose local copy was already current
    pub up_to_date: Vec<String>,
    /// Bytes written by transfers
    pub bytes: u64,
}

/// Decide what to do with `file`.
///
/// A local copy is current when its size matches and either its metadata
/// records the same etag and the file was not touched after the metadata
/// was written, or (LFS files only) its sha256 equals the etag.
pub(crate) fn plan_entry(mirror: &LocalMirror, file: RemoteFile, force: bool) -> FetchResult<PlanEntry> {
    let local_path = mirror.local_path(&file.path)?;
    let mut entry = PlanEntry {
        file,
        local_path,
        action: FetchAction::Download,
        refresh_metadata: false,
    };

    if force {
        return Ok(entry);
    }

    let Ok(local) = fs::metadata(&entry.local_path) else {
        debug!(file = %entry.file.path, "not present locally");
        return Ok(entry);
    };
    if !local.is_file() || local.len() != entry.file.size {
        debug!(
            file = %entry.file.path,
            local_size = local.len(),
            remote_size = entry.file.size,
            "local copy differs in size"
        );
        return Ok(entry);
    }

    if let Some(metadata) = mirror.read_metadata(&entry.file.path) {
        if metadata.etag == entry.file.etag {
            let modified = local
                .modified()
                .map_err(|e| FetchError::io(&entry.local_path, e))?;
            let mtime = unix_seconds(DateTime::<Utc>::from(modified));
            if mtime - MTIME_TOLERANCE_SECS <= metadata.timestamp {
                entry.action = FetchAction::UpToDate;
                return Ok(entry);
            }
            debug!(file = %entry.file.path, "local copy modified after last fetch");
        }
    }

    if entry.file.is_lfs && sha256_file(&entry.local_path)? == entry.file.etag {
        debug!(file = %entry.file.path, "local copy verified by sha256");
        entry.action = FetchAction::UpToDate;
        entry.refresh_metadata = true;
    }

    Ok(entry)
}

/// Lowercase hex sha256 of a file.
fn sha256_file(path: &Path) -> FetchResult<String> {
    let mut file = File::open(path).map_err(|e| FetchError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 1024 * 1024];

    loop {
        let n = file.read(&mut buffer).map_err(|e| FetchError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
