//! HTTP backend abstraction for the Hub API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest. Failures are returned as-is: no retries.

use std::path::Path;

use async_trait::async_trait;
use evalkit_core::TransferProgress;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use crate::error::{HfError, HfResult};
use crate::models::HfConfig;
use crate::parsing::parse_next_link;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends used by `HfClient`.
///
/// This is an implementation detail - external code should use the
/// `DatasetHubPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HfResult<T>;

    /// Fetch one page of JSON and the URL of the next page, if any.
    async fn get_json_page<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
    ) -> HfResult<(T, Option<Url>)>;

    /// Stream the body of `url` into `dest` (created or truncated).
    ///
    /// Returns the number of bytes written.
    async fn download_to(
        &self,
        url: &Url,
        dest: &Path,
        progress: &TransferProgress,
    ) -> HfResult<u64>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HfConfig) -> HfResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            auth_token: config.token.clone(),
        })
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.as_str());
        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send a GET request, turning non-success statuses into errors.
    async fn send(&self, url: &Url) -> HfResult<reqwest::Response> {
        let response = self.build_request(url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_code = response
            .headers()
            .get("X-Error-Code")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        Err(HfError::ApiRequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
            error_code,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HfResult<T> {
        let response = self.send(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn get_json_page<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
    ) -> HfResult<(T, Option<Url>)> {
        let response = self.send(url).await?;

        // Pagination via Link header
        let next = response
            .headers()
            .get("Link")
            .and_then(|h| h.to_str().ok())
            .and_then(parse_next_link);

        let data: T = response.json().await?;
        Ok((data, next))
    }

    async fn download_to(
        &self,
        url: &Url,
        dest: &Path,
        progress: &TransferProgress,
    ) -> HfResult<u64> {
        let response = self.send(url).await?;
        debug!(url = %url, dest = %dest.display(), "streaming download");

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| HfError::io(dest, e))?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| HfError::io(dest, e))?;
            let len = chunk.len() as u64;
            written += len;
            progress.advance(len);
        }

        file.flush().await.map_err(|e| HfError::io(dest, e))?;
        file.sync_all().await.map_err(|e| HfError::io(dest, e))?;
        Ok(written)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = HfConfig::default();
        let backend = ReqwestBackend::new(&config).unwrap();
        assert!(backend.auth_token.is_none());
    }

    #[test]
    fn test_reqwest_backend_with_token() {
        let config = HfConfig {
            token: Some("test_token".to_string()),
            ..Default::default()
        };
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.auth_token, Some("test_token".to_string()));
    }

    #[tokio::test]
    async fn test_fake_backend_returns_canned_response() {
        let backend = FakeBackend::new().with_response(
            "revision/main",
            CannedResponse::last_page(json!({"sha": "abc"})),
        );

        let url = Url::parse("https://example.com/api/datasets/o/d/revision/main").unwrap();
        let result: serde_json::Value = backend.get_json(&url).await.unwrap();

        assert_eq!(result["sha"], "abc");
    }

    #[tokio::test]
    async fn test_fake_backend_returns_404_for_unknown_url() {
        let backend = FakeBackend::new();
        let url = Url::parse("https://example.com/unknown").unwrap();

        let result: HfResult<serde_json::Value> = backend.get_json(&url).await;
        assert!(matches!(
            result,
            Err(HfError::ApiRequestFailed { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fake_backend_paginated() {
        let backend = FakeBackend::new().with_response(
            "tree",
            CannedResponse {
                json: json!([{"path": "a"}, {"path": "b"}]),
                next: Some("https://example.com/tree?cursor=2".to_string()),
            },
        );

        let url = Url::parse("https://example.com/tree").unwrap();
        let (result, next): (Vec<serde_json::Value>, Option<Url>) =
            backend.get_json_page(&url).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(next.unwrap().as_str(), "https://example.com/tree?cursor=2");
    }

    #[tokio::test]
    async fn test_fake_backend_download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");
        let backend = FakeBackend::new().with_body("resolve", b"hello");
        let progress = TransferProgress::silent("out.bin", 5);

        let url = Url::parse("https://example.com/datasets/o/d/resolve/abc/out.bin").unwrap();
        let written = backend.download_to(&url, &dest, &progress).await.unwrap();

        assert_eq!(written, 5);
        assert_eq!(progress.downloaded(), 5);
        assert_eq!(std::fs::read(&dest).unwrap(), b"hello");
    }
}
