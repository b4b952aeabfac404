//! JSON and header parsing for Hub API responses.
//!
//! Pure sync functions that convert raw responses into typed objects.

use serde_json::Value;
use url::Url;

use crate::error::{HfError, HfResult};
use crate::models::{HfEntryType, HfLfsInfo, HfTreeEntry};

// ============================================================================
// Revision Parsing
// ============================================================================

/// Extract the commit sha from a revision info response.
pub fn parse_revision_sha(json: &Value) -> HfResult<String> {
    json.get("sha")
        .and_then(Value::as_str)
        .filter(|sha| !sha.is_empty())
        .map(str::to_string)
        .ok_or_else(|| HfError::InvalidResponse {
            message: "Missing 'sha' in revision info".to_string(),
        })
}

// ============================================================================
// Tree Entry Parsing
// ============================================================================

/// Parse a tree listing page into `HfTreeEntry` items.
///
/// Entries without a path are skipped.
pub fn parse_tree_entries(json: &Value) -> HfResult<Vec<HfTreeEntry>> {
    let array = json.as_array().ok_or_else(|| HfError::InvalidResponse {
        message: "Expected array for tree response".to_string(),
    })?;

    let entries = array
        .iter()
        .filter_map(|item| {
            let path = item.get("path").and_then(Value::as_str)?.to_string();
            let entry_type = match item.get("type").and_then(Value::as_str) {
                Some("directory") => HfEntryType::Directory,
                _ => HfEntryType::File,
            };
            let size = item.get("size").and_then(Value::as_u64).unwrap_or(0);
            let oid = item
                .get("oid")
                .and_then(Value::as_str)
                .map(str::to_string);
            let lfs = item.get("lfs").and_then(|lfs| {
                let oid = lfs.get("oid").and_then(Value::as_str)?.to_string();
                let size = lfs.get("size").and_then(Value::as_u64).unwrap_or(size);
                Some(HfLfsInfo { oid, size })
            });

            Some(HfTreeEntry {
                path,
                entry_type,
                size,
                oid,
                lfs,
            })
        })
        .collect();

    Ok(entries)
}

// ============================================================================
// Pagination
// ============================================================================

/// Find the `rel="next"` target of an RFC 8288 `Link` header.
pub fn parse_next_link(header: &str) -> Option<Url> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}
