//! Hub client port trait.

use std::path::Path;

use async_trait::async_trait;

use super::error::HubPortResult;
use super::progress::TransferProgress;
use super::types::RemoteFile;
use crate::domain::RepoRef;

/// Port trait for repository hosting operations.
///
/// # Design
///
/// - Uses core-owned DTOs, not Hub API types
/// - Returns `HubPortError` for all failures
/// - Async methods for network operations
#[async_trait]
pub trait DatasetHubPort: Send + Sync {
    /// Resolve a branch, tag or commit to a full commit sha.
    async fn resolve_revision(&self, repo: &RepoRef, revision: &str) -> HubPortResult<String>;

    /// List every file of the repository at `revision`, recursively.
    ///
    /// Directories are not returned.
    async fn list_files(&self, repo: &RepoRef, revision: &str) -> HubPortResult<Vec<RemoteFile>>;

    /// Download the full content of `file` into `dest`, truncating it.
    ///
    /// Returns the number of bytes written.
    async fn download_file(
        &self,
        repo: &RepoRef,
        revision: &str,
        file: &RemoteFile,
        dest: &Path,
        progress: &TransferProgress,
    ) -> HubPortResult<u64>;
}
