//! Internal API response types for the Hub.
//!
//! These types are internal to `evalkit-hf`. External consumers use the port
//! DTOs defined in `evalkit-core`.

use url::Url;

use crate::config::DEFAULT_ENDPOINT;

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Internal configuration for the Hub client.
#[derive(Debug, Clone)]
pub struct HfConfig {
    /// Base URL of the Hub (default: <https://huggingface.co>)
    pub endpoint: Url,
    /// Optional authentication token
    pub token: Option<String>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl HfConfig {
    /// Endpoint as a string without a trailing slash.
    pub fn endpoint_base(&self) -> &str {
        self.endpoint.as_str().trim_end_matches('/')
    }
}

impl Default for HfConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default HF endpoint is valid"),
            token: None,
            user_agent: "evalkit-hf".to_string(),
        }
    }
}

// ============================================================================
// Tree Entry
// ============================================================================

/// Type of entry in a repository tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HfEntryType {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// LFS pointer information attached to a tree entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HfLfsInfo {
    /// sha256 of the file content
    pub oid: String,
    /// Size of the file content in bytes
    pub size: u64,
}

/// Entry in a repository file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HfTreeEntry {
    /// Path relative to repository root
    pub path: String,
    /// Entry type (file or directory)
    pub entry_type: HfEntryType,
    /// Size in bytes as reported by git (pointer size for LFS files)
    pub size: u64,
    /// Git object id
    pub oid: Option<String>,
    /// LFS information, for files stored in LFS
    pub lfs: Option<HfLfsInfo>,
}

impl HfTreeEntry {
    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        self.entry_type == HfEntryType::Directory
    }

    /// Size of the actual content (LFS size when present).
    pub fn content_size(&self) -> u64 {
        self.lfs.as_ref().map_or(self.size, |lfs| lfs.size)
    }

    /// Identifier of the content: LFS sha256 when present, git oid otherwise.
    pub fn etag(&self) -> Option<&str> {
        self.lfs
            .as_ref()
            .map(|lfs| lfs.oid.as_str())
            .or(self.oid.as_deref())
    }
}
