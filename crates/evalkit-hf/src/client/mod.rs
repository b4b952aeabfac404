//! Hub client for resolving revisions, listing trees and downloading files.

mod resolve;
mod tree;

use url::Url;

use crate::config::HubClientConfig;
use crate::error::HfResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::HfConfig;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Hub client using the reqwest HTTP backend.
pub type DefaultHfClient = HfClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for interacting with the Hub API.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultHfClient` for production code.
pub struct HfClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: HfConfig,
}

impl DefaultHfClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &HubClientConfig) -> HfResult<Self> {
        let internal_config = Self::to_internal_config(config)?;
        let backend = ReqwestBackend::new(&internal_config)?;
        Ok(Self {
            backend,
            config: internal_config,
        })
    }

    fn to_internal_config(config: &HubClientConfig) -> HfResult<HfConfig> {
        Ok(HfConfig {
            endpoint: Url::parse(&config.endpoint)?,
            token: config.token.clone(),
            user_agent: config.user_agent.clone(),
        })
    }
}

impl<B: HttpBackend> HfClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: HfConfig, backend: B) -> Self {
        Self { backend, config }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::HfError;

    pub fn test_config() -> HfConfig {
        HfConfig::default()
    }

    #[test]
    fn test_default_client_creation() {
        let client = DefaultHfClient::new(&HubClientConfig::new()).unwrap();
        assert_eq!(client.config.endpoint_base(), "https://huggingface.co");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = DefaultHfClient::new(&HubClientConfig::new().with_endpoint("not a url"));
        assert!(matches!(result, Err(HfError::InvalidUrl(_))));
    }
}
