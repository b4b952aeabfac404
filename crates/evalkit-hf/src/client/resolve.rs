//! File downloads through the `resolve` endpoint.

use std::path::Path;

use evalkit_core::{RepoRef, TransferProgress};

use crate::error::HfResult;
use crate::http::HttpBackend;
use crate::url::build_resolve_url;

use super::HfClient;

impl<B: HttpBackend> HfClient<B> {
    /// Download one file of the repository at `revision` into `dest`.
    pub(crate) async fn fetch_file(
        &self,
        repo: &RepoRef,
        revision: &str,
        path: &str,
        dest: &Path,
        progress: &TransferProgress,
    ) -> HfResult<u64> {
        let url = build_resolve_url(&self.config, repo, revision, path)?;
        self.backend.download_to(&url, dest, progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::test_config;
    use crate::http::testing::FakeBackend;

    #[tokio::test]
    async fn test_download_uses_resolve_url() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("games.pgn.gz");
        let backend = FakeBackend::new().with_body("/resolve/abc/25-04-01-x/r/games.pgn.gz", b"PGN");
        let client = HfClient::with_backend(test_config(), backend);
        let repo = RepoRef::dataset("org/data").unwrap();
        let progress = TransferProgress::silent("games.pgn.gz", 3);

        let written = client
            .fetch_file(&repo, "abc", "25-04-01-x/r/games.pgn.gz", &dest, &progress)
            .await
            .unwrap();

        assert_eq!(written, 3);
        assert_eq!(std::fs::read(&dest).unwrap(), b"PGN");
        assert_eq!(
            client.backend.requested(),
            vec!["https://huggingface.co/datasets/org/data/resolve/abc/25-04-01-x/r/games.pgn.gz"]
        );
    }
}
