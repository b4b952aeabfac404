//! Integration tests for `SnapshotFetcher` against an in-memory hub.
//!
//! # What is tested
//!
//! - Only files matching an allow pattern (and no ignore pattern) land locally
//! - A second fetch of an unchanged revision transfers nothing
//! - Changed remote content and `force` trigger a new transfer
//! - Dry-run plans touch nothing on disk
//! - LFS files with a valid local copy are adopted without a transfer

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use evalkit_core::{
    DatasetHubPort, HubPortError, HubPortResult, RemoteFile, RepoRef, SnapshotRequest,
    TransferProgress,
};
use evalkit_fetch::{FetchAction, LocalMirror, SnapshotFetcher};
use sha2::{Digest, Sha256};
use tempfile::tempdir;

// ── Fake hub ───────────────────────────────────────────────────────

/// In-memory repository with a single branch.
#[derive(Default)]
struct FakeHub {
    commit: Mutex<String>,
    files: Mutex<BTreeMap<String, (Vec<u8>, bool)>>,
    downloads: Mutex<Vec<String>>,
}

impl FakeHub {
    fn new(commit: &str) -> Self {
        Self {
            commit: Mutex::new(commit.to_string()),
            ..Self::default()
        }
    }

    fn put(&self, path: &str, content: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), (content.to_vec(), false));
    }

    fn put_lfs(&self, path: &str, content: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), (content.to_vec(), true));
    }

    fn commit(&self, sha: &str) {
        *self.commit.lock().unwrap() = sha.to_string();
    }

    fn take_downloads(&self) -> Vec<String> {
        std::mem::take(&mut *self.downloads.lock().unwrap())
    }
}

fn etag(content: &[u8], is_lfs: bool) -> String {
    let digest = format!("{:x}", Sha256::digest(content));
    if is_lfs { digest } else { digest[..40].to_string() }
}

#[async_trait]
impl DatasetHubPort for FakeHub {
    async fn resolve_revision(&self, repo: &RepoRef, revision: &str) -> HubPortResult<String> {
        if repo.id != "official-stockfish/fishtest_pgns" {
            return Err(HubPortError::RepoNotFound {
                repo: repo.to_string(),
            });
        }
        if revision != "main" {
            return Err(HubPortError::RevisionNotFound {
                repo: repo.to_string(),
                revision: revision.to_string(),
            });
        }
        Ok(self.commit.lock().unwrap().clone())
    }

    async fn list_files(&self, _repo: &RepoRef, _revision: &str) -> HubPortResult<Vec<RemoteFile>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .map(|(path, (content, is_lfs))| RemoteFile {
                path: path.clone(),
                size: content.len() as u64,
                etag: etag(content, *is_lfs),
                is_lfs: *is_lfs,
            })
            .collect())
    }

    async fn download_file(
        &self,
        _repo: &RepoRef,
        _revision: &str,
        file: &RemoteFile,
        dest: &Path,
        progress: &TransferProgress,
    ) -> HubPortResult<u64> {
        let content = self.files.lock().unwrap()[&file.path].0.clone();
        std::fs::write(dest, &content).map_err(|e| HubPortError::Io {
            path: dest.display().to_string(),
            message: e.to_string(),
        })?;
        progress.advance(content.len() as u64);
        self.downloads.lock().unwrap().push(file.path.clone());
        Ok(content.len() as u64)
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn fishtest_hub() -> Arc<FakeHub> {
    let hub = FakeHub::new("1111111111111111111111111111111111111111");
    hub.put("README.md", b"# fishtest pgns");
    hub.put("25-03-31-run/aa/games.pgn.gz", b"march");
    hub.put("25-04-01-run/bb/games.pgn.gz", b"april one");
    hub.put("25-04-15-run/cc/games-1.pgn.gz", b"april two");
    hub.put("25-04-15-run/cc/games.txt", b"not a pgn");
    hub.put("25-05-01-run/dd/games.pgn.gz", b"may");
    Arc::new(hub)
}

fn request(local_dir: &Path) -> SnapshotRequest {
    SnapshotRequest::new(
        RepoRef::dataset("official-stockfish/fishtest_pgns").unwrap(),
        "25-04-*/*/*.pgn.gz",
        local_dir.to_path_buf(),
    )
}

/// Every regular file under `root`, relative, excluding the bookkeeping dir.
fn local_files(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                if path.file_name().unwrap() != ".cache" {
                    walk(&path, root, out);
                }
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_mirrors_only_matching_files() {
    let dir = tempdir().unwrap();
    let local_dir = dir.path().join("pgns");
    let hub = fishtest_hub();
    let fetcher = SnapshotFetcher::new(hub.clone());

    let report = fetcher.fetch(&request(&local_dir)).await.unwrap();

    assert_eq!(
        local_files(&local_dir),
        vec!["25-04-01-run/bb/games.pgn.gz", "25-04-15-run/cc/games-1.pgn.gz"]
    );
    assert_eq!(report.downloaded.len(), 2);
    assert!(report.up_to_date.is_empty());
    assert_eq!(report.bytes, 18);
    assert_eq!(
        std::fs::read(local_dir.join("25-04-01-run/bb/games.pgn.gz")).unwrap(),
        b"april one"
    );
    assert_eq!(
        std::fs::read_to_string(local_dir.join(".cache/huggingface/.gitignore")).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn second_fetch_transfers_nothing() {
    let dir = tempdir().unwrap();
    let hub = fishtest_hub();
    let fetcher = SnapshotFetcher::new(hub.clone());
    let req = request(dir.path());

    fetcher.fetch(&req).await.unwrap();
    let before = local_files(dir.path());
    hub.take_downloads();

    let report = fetcher.fetch(&req).await.unwrap();

    assert!(hub.take_downloads().is_empty());
    assert!(report.downloaded.is_empty());
    assert_eq!(report.up_to_date.len(), 2);
    assert_eq!(report.bytes, 0);
    assert_eq!(local_files(dir.path()), before);
}

#[tokio::test]
async fn changed_remote_file_is_fetched_again() {
    let dir = tempdir().unwrap();
    let hub = fishtest_hub();
    let fetcher = SnapshotFetcher::new(hub.clone());
    let req = request(dir.path());
    fetcher.fetch(&req).await.unwrap();
    hub.take_downloads();

    hub.put("25-04-01-run/bb/games.pgn.gz", b"april one, rescored");
    hub.commit("2222222222222222222222222222222222222222");
    let report = fetcher.fetch(&req).await.unwrap();

    assert_eq!(hub.take_downloads(), vec!["25-04-01-run/bb/games.pgn.gz"]);
    assert_eq!(report.commit_sha, "2222222222222222222222222222222222222222");
    assert_eq!(
        std::fs::read(dir.path().join("25-04-01-run/bb/games.pgn.gz")).unwrap(),
        b"april one, rescored"
    );

    let metadata = LocalMirror::new(dir.path())
        .read_metadata("25-04-01-run/bb/games.pgn.gz")
        .unwrap();
    assert_eq!(metadata.commit_sha, "2222222222222222222222222222222222222222");
}

#[tokio::test]
async fn force_fetches_everything() {
    let dir = tempdir().unwrap();
    let hub = fishtest_hub();
    let fetcher = SnapshotFetcher::new(hub.clone());
    fetcher.fetch(&request(dir.path())).await.unwrap();
    hub.take_downloads();

    let report = fetcher
        .fetch(&request(dir.path()).with_force(true))
        .await
        .unwrap();

    assert_eq!(report.downloaded.len(), 2);
    assert_eq!(hub.take_downloads().len(), 2);
}

#[tokio::test]
async fn ignore_patterns_exclude_files() {
    let dir = tempdir().unwrap();
    let hub = fishtest_hub();
    let fetcher = SnapshotFetcher::new(hub.clone());
    let req = request(dir.path()).with_ignore_patterns(["*/cc/*"]);

    fetcher.fetch(&req).await.unwrap();

    assert_eq!(local_files(dir.path()), vec!["25-04-01-run/bb/games.pgn.gz"]);
}

#[tokio::test]
async fn plan_does_not_touch_disk() {
    let dir = tempdir().unwrap();
    let local_dir = dir.path().join("pgns");
    let hub = fishtest_hub();
    let fetcher = SnapshotFetcher::new(hub.clone());

    let plan = fetcher.plan(&request(&local_dir)).await.unwrap();

    assert_eq!(plan.entries.len(), 2);
    assert!(plan.entries.iter().all(|e| e.action == FetchAction::Download));
    assert_eq!(plan.download_bytes(), 18);
    assert!(hub.take_downloads().is_empty());
    assert!(local_files(&local_dir).is_empty());
    assert!(!local_dir.join(".cache").exists());
}

#[tokio::test]
async fn valid_lfs_copy_is_adopted() {
    let dir = tempdir().unwrap();
    let hub = FakeHub::new("3333333333333333333333333333333333333333");
    hub.put_lfs("25-04-02-run/ee/games.pgn.gz", b"lfs content");
    let hub = Arc::new(hub);

    let local = dir.path().join("25-04-02-run/ee/games.pgn.gz");
    std::fs::create_dir_all(local.parent().unwrap()).unwrap();
    std::fs::write(&local, b"lfs content").unwrap();

    let fetcher = SnapshotFetcher::new(hub.clone());
    let report = fetcher.fetch(&request(dir.path())).await.unwrap();

    assert!(hub.take_downloads().is_empty());
    assert_eq!(report.up_to_date, vec!["25-04-02-run/ee/games.pgn.gz"]);
    assert!(
        LocalMirror::new(dir.path())
            .read_metadata("25-04-02-run/ee/games.pgn.gz")
            .is_some()
    );
}

#[tokio::test]
async fn unknown_repository_is_an_error() {
    let dir = tempdir().unwrap();
    let fetcher = SnapshotFetcher::new(fishtest_hub());
    let req = SnapshotRequest::new(
        RepoRef::dataset("nobody/nothing").unwrap(),
        "*",
        dir.path().to_path_buf(),
    );

    let err = fetcher.fetch(&req).await.unwrap_err();

    assert!(err.to_string().contains("nobody/nothing"));
}
