//! Revision resolution and recursive tree listing.

use evalkit_core::RepoRef;
use tracing::debug;

use crate::error::HfResult;
use crate::http::HttpBackend;
use crate::models::HfTreeEntry;
use crate::parsing::{parse_revision_sha, parse_tree_entries};
use crate::url::{build_revision_url, build_tree_url};

use super::HfClient;

impl<B: HttpBackend> HfClient<B> {
    /// Get the commit sha a revision currently points to.
    pub(crate) async fn get_revision_sha(&self, repo: &RepoRef, revision: &str) -> HfResult<String> {
        let url = build_revision_url(&self.config, repo, revision)?;
        let info: serde_json::Value = self.backend.get_json(&url).await?;
        parse_revision_sha(&info)
    }

    /// List every entry of the repository tree at `revision`.
    ///
    /// Follows `Link` pagination until the last page.
    pub(crate) async fn list_tree(&self, repo: &RepoRef, revision: &str) -> HfResult<Vec<HfTreeEntry>> {
        let mut entries = Vec::new();
        let mut next = Some(build_tree_url(&self.config, repo, revision)?);
        let mut pages = 0usize;

        while let Some(url) = next {
            let (page, next_url): (serde_json::Value, _) = self.backend.get_json_page(&url).await?;
            entries.extend(parse_tree_entries(&page)?);
            next = next_url;
            pages += 1;
        }

        debug!(repo = %repo, pages, entries = entries.len(), "listed repository tree");
        Ok(entries)
    }
}
