//! URL construction helpers for the Hub API.
//!
//! Pure functions so every request uses the same URL shape. Revisions are
//! encoded as a single path segment (`refs/pr/1` becomes `refs%2Fpr%2F1`);
//! file paths are encoded segment by segment.

use evalkit_core::RepoRef;
use url::Url;

use crate::error::HfResult;
use crate::models::HfConfig;

/// Encode a revision as one path segment.
fn encode_revision(revision: &str) -> String {
    urlencoding::encode(revision).into_owned()
}

/// Encode a repository file path, keeping `/` separators.
fn encode_file_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the URL of the revision info endpoint.
pub fn build_revision_url(config: &HfConfig, repo: &RepoRef, revision: &str) -> HfResult<Url> {
    let url = format!(
        "{}/api/{}/{}/revision/{}",
        config.endpoint_base(),
        repo.kind.api_segment(),
        repo.id,
        encode_revision(revision),
    );
    Ok(Url::parse(&url)?)
}

/// Build the URL of the first page of a recursive tree listing.
pub fn build_tree_url(config: &HfConfig, repo: &RepoRef, revision: &str) -> HfResult<Url> {
    let url = format!(
        "{}/api/{}/{}/tree/{}?recursive=true&expand=false",
        config.endpoint_base(),
        repo.kind.api_segment(),
        repo.id,
        encode_revision(revision),
    );
    Ok(Url::parse(&url)?)
}

/// Build the URL for downloading a file from a repository.
pub fn build_resolve_url(
    config: &HfConfig,
    repo: &RepoRef,
    revision: &str,
    file_path: &str,
) -> HfResult<Url> {
    let url = format!(
        "{}/{}{}/resolve/{}/{}",
        config.endpoint_base(),
        repo.kind.url_prefix(),
        repo.id,
        encode_revision(revision),
        encode_file_path(file_path),
    );
    Ok(Url::parse(&url)?)
}
