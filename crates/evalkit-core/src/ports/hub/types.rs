//! Core-owned DTOs for hub operations.

/// A file in a remote repository tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Path relative to repository root, `/`-separated
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Content identifier: LFS sha256 for LFS files, git blob id otherwise
    pub etag: String,
    /// Whether the file is stored in LFS (etag is then a sha256 of the content)
    pub is_lfs: bool,
}
