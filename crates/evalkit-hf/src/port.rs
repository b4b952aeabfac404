//! Port trait implementation for `HfClient`.
//!
//! This module implements the core-owned `DatasetHubPort` trait for `HfClient`,
//! handling the conversion between internal Hub types and core DTOs.

use std::path::Path;

use async_trait::async_trait;
use evalkit_core::{
    DatasetHubPort, HubPortError, HubPortResult, RemoteFile, RepoRef, TransferProgress,
};

use crate::client::HfClient;
use crate::error::HfError;
use crate::http::HttpBackend;
use crate::models::HfTreeEntry;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HfError` to core `HubPortError`.
fn map_error(err: HfError, repo: &RepoRef, revision: &str) -> HubPortError {
    match err {
        HfError::ApiRequestFailed {
            status,
            url,
            error_code,
        } => match (status, error_code.as_deref()) {
            (_, Some("RevisionNotFound")) => HubPortError::RevisionNotFound {
                repo: repo.to_string(),
                revision: revision.to_string(),
            },
            (_, Some("EntryNotFound")) => HubPortError::InvalidResponse {
                message: format!("listed file is missing on the server: {url}"),
            },
            (_, Some("RepoNotFound")) | (404, _) => HubPortError::RepoNotFound {
                repo: repo.to_string(),
            },
            (_, Some("GatedRepo")) | (401 | 403, _) => HubPortError::AuthRequired {
                repo: repo.to_string(),
            },
            (429, _) => HubPortError::RateLimited,
            _ => HubPortError::Network {
                message: format!("API request failed with status {status}: {url}"),
            },
        },
        HfError::InvalidResponse { message } => HubPortError::InvalidResponse { message },
        HfError::Network(e) => HubPortError::Network {
            message: e.to_string(),
        },
        HfError::InvalidUrl(e) => HubPortError::Configuration {
            message: e.to_string(),
        },
        HfError::JsonParse(e) => HubPortError::InvalidResponse {
            message: e.to_string(),
        },
        HfError::Io { path, source } => HubPortError::Io {
            path: path.display().to_string(),
            message: source.to_string(),
        },
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Convert a file tree entry to a core `RemoteFile`.
fn to_remote_file(entry: &HfTreeEntry) -> HubPortResult<RemoteFile> {
    let etag = entry.etag().ok_or_else(|| HubPortError::InvalidResponse {
        message: format!("tree entry '{}' has no object id", entry.path),
    })?;

    Ok(RemoteFile {
        path: entry.path.clone(),
        size: entry.content_size(),
        etag: etag.to_string(),
        is_lfs: entry.lfs.is_some(),
    })
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> DatasetHubPort for HfClient<B> {
    async fn resolve_revision(&self, repo: &RepoRef, revision: &str) -> HubPortResult<String> {
        self.get_revision_sha(repo, revision)
            .await
            .map_err(|e| map_error(e, repo, revision))
    }

    async fn list_files(&self, repo: &RepoRef, revision: &str) -> HubPortResult<Vec<RemoteFile>> {
        let entries = self
            .list_tree(repo, revision)
            .await
            .map_err(|e| map_error(e, repo, revision))?;

        entries
            .iter()
            .filter(|entry| !entry.is_directory())
            .map(to_remote_file)
            .collect()
    }

    async fn download_file(
        &self,
        repo: &RepoRef,
        revision: &str,
        file: &RemoteFile,
        dest: &Path,
        progress: &TransferProgress,
    ) -> HubPortResult<u64> {
        self.fetch_file(repo, revision, &file.path, dest, progress)
            .await
            .map_err(|e| map_error(e, repo, revision))
    }
}
