//! Per-file transfer progress reporting.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Callback for transfer progress: (`label`, `downloaded_bytes`, `total_bytes`)
pub type ProgressCallback = Arc<dyn Fn(&str, u64, u64) + Send + Sync>;

/// Progress reporter handed to `DatasetHubPort::download_file`.
///
/// Adapters call [`advance`](Self::advance) as bytes arrive; the optional
/// callback sees the running total after every call.
pub struct TransferProgress {
    label: String,
    total: u64,
    downloaded: AtomicU64,
    callback: Option<ProgressCallback>,
}

impl TransferProgress {
    pub fn new(label: impl Into<String>, total: u64, callback: Option<ProgressCallback>) -> Self {
        Self {
            label: label.into(),
            total,
            downloaded: AtomicU64::new(0),
            callback,
        }
    }

    /// A reporter that only counts bytes.
    pub fn silent(label: impl Into<String>, total: u64) -> Self {
        Self::new(label, total, None)
    }

    /// Record `bytes` more bytes and notify the callback.
    pub fn advance(&self, bytes: u64) {
        let downloaded = self.downloaded.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if let Some(callback) = &self.callback {
            callback(&self.label, downloaded, self.total);
        }
    }

    pub fn downloaded(&self) -> u64 {
        self.downloaded.load(Ordering::Relaxed)
    }

    pub const fn total(&self) -> u64 {
        self.total
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for TransferProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferProgress")
            .field("label", &self.label)
            .field("total", &self.total)
            .field("downloaded", &self.downloaded())
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_silent_counts_bytes() {
        let progress = TransferProgress::silent("file.pgn.gz", 100);
        progress.advance(40);
        progress.advance(60);
        assert_eq!(progress.downloaded(), 100);
        assert_eq!(progress.total(), 100);
        assert_eq!(progress.label(), "file.pgn.gz");
    }

    #[test]
    fn test_callback_sees_running_total() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Arc::new(move |label, downloaded, total| {
            sink.lock()
                .unwrap()
                .push((label.to_string(), downloaded, total));
        });

        let progress = TransferProgress::new("a", 10, Some(callback));
        progress.advance(3);
        progress.advance(7);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("a".to_string(), 3, 10),
                ("a".to_string(), 10, 10),
            ]
        );
        assert_eq!(progress.downloaded(), 10);
    }
}
