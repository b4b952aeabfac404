//! Snapshot fetcher: mirror the selected files of a repository revision.

use std::sync::Arc;

use evalkit_core::{
    DatasetHubPort, DirectoryCreationStrategy, ProgressCallback, RemoteFile, RepoRef,
    SnapshotRequest, TransferProgress, ensure_directory,
};
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::mirror::LocalMirror;
use crate::patterns::PathFilter;
use crate::plan::{FetchAction, FetchPlan, FetchReport, PlanEntry, plan_entry};

/// Mirrors files of a remote repository into a local directory.
///
/// Files are transferred one at a time. Re-running a fetch against an
/// unchanged revision transfers nothing.
pub struct SnapshotFetcher {
    hub: Arc<dyn DatasetHubPort>,
    progress: Option<ProgressCallback>,
}

impl SnapshotFetcher {
    pub fn new(hub: Arc<dyn DatasetHubPort>) -> Self {
        Self {
            hub,
            progress: None,
        }
    }

    /// Report per-file transfer progress to `callback`.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Resolve the revision, list and filter the remote files and compare
    /// them with the local directory. Nothing is transferred.
    pub async fn plan(&self, request: &SnapshotRequest) -> FetchResult<FetchPlan> {
        let filter = PathFilter::new(&request.allow_patterns, &request.ignore_patterns)?;
        ensure_directory(&request.local_dir, DirectoryCreationStrategy::AutoCreate)?;

        let commit_sha = self
            .hub
            .resolve_revision(&request.repo, &request.revision)
            .await?;
        debug!(repo = %request.repo, revision = %request.revision, %commit_sha, "resolved revision");

        let listed = self.hub.list_files(&request.repo, &commit_sha).await?;
        let listed_count = listed.len();
        let selected: Vec<RemoteFile> = listed
            .into_iter()
            .filter(|file| filter.is_selected(&file.path))
            .collect();
        info!(
            repo = %request.repo,
            listed = listed_count,
            selected = selected.len(),
            "filtered repository files"
        );

        let mirror = LocalMirror::new(request.local_dir.clone());
        let force = request.force;
        let entries = tokio::task::spawn_blocking(move || {
            selected
                .into_iter()
                .map(|file| plan_entry(&mirror, file, force))
                .collect::<FetchResult<Vec<_>>>()
        })
        .await??;

        Ok(FetchPlan {
            commit_sha,
            local_dir: request.local_dir.clone(),
            entries,
        })
    }

    /// Plan and perform a fetch.
    pub async fn fetch(&self, request: &SnapshotRequest) -> FetchResult<FetchReport> {
        let plan = self.plan(request).await?;
        self.execute(&request.repo, plan).await
    }

    /// Perform a previously computed plan.
    pub async fn execute(&self, repo: &RepoRef, plan: FetchPlan) -> FetchResult<FetchReport> {
        let mirror = LocalMirror::new(plan.local_dir.clone());
        mirror.ensure_cache_dir()?;

        let mut report = FetchReport {
            commit_sha: plan.commit_sha.clone(),
            local_dir: plan.local_dir.clone(),
            ..FetchReport::default()
        };

        for entry in &plan.entries {
            match entry.action {
                FetchAction::UpToDate => {
                    if entry.refresh_metadata {
                        mirror.write_metadata(&entry.file.path, &plan.commit_sha, &entry.file.etag)?;
                    }
                    debug!(file = %entry.file.path, "up to date");
                    report.up_to_date.push(entry.file.path.clone());
                }
                FetchAction::Download => {
                    let written = self
                        .download_entry(repo, &plan.commit_sha, &mirror, entry)
                        .await?;
                    report.bytes += written;
                    report.downloaded.push(entry.file.path.clone());
                }
            }
        }

        info!(
            commit = %report.commit_sha,
            downloaded = report.downloaded.len(),
            up_to_date = report.up_to_date.len(),
            bytes = report.bytes,
            "fetch complete"
        );
        Ok(report)
    }

    /// Transfer one file into place.
    ///
    /// The content lands in an `.incomplete` file first and only replaces
    /// the local copy once the transfer succeeded.
    async fn download_entry(
        &self,
        repo: &RepoRef,
        commit_sha: &str,
        mirror: &LocalMirror,
        entry: &PlanEntry,
    ) -> FetchResult<u64> {
        let incomplete = mirror.incomplete_path(&entry.file.path)?;
        for dir in [incomplete.parent(), entry.local_path.parent()].into_iter().flatten() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| FetchError::io(dir, e))?;
        }

        debug!(file = %entry.file.path, size = entry.file.size, "downloading");
        let progress = TransferProgress::new(
            entry.file.path.clone(),
            entry.file.size,
            self.progress.clone(),
        );

        let written = match self
            .hub
            .download_file(repo, commit_sha, &entry.file, &incomplete, &progress)
            .await
        {
            Ok(written) => written,
            Err(err) => {
                discard(&incomplete).await;
                return Err(err.into());
            }
        };

        if written != entry.file.size {
            discard(&incomplete).await;
            return Err(FetchError::SizeMismatch {
                path: entry.file.path.clone(),
                expected: entry.file.size,
                actual: written,
            });
        }

        tokio::fs::rename(&incomplete, &entry.local_path)
            .await
            .map_err(|e| FetchError::io(&entry.local_path, e))?;
        mirror.write_metadata(&entry.file.path, commit_sha, &entry.file.etag)?;
        Ok(written)
    }
}

async fn discard(path: &std::path::Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "failed to remove partial download");
        }
    }
}
