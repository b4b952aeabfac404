//! Public configuration for the Hub client.
//!
//! This module provides a stable public API for configuring the client.
//! The internal config is derived from this.

/// Default Hub endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// Configuration for the Hub client.
///
/// # Example
///
/// ```
/// use evalkit_hf::HubClientConfig;
///
/// let config = HubClientConfig::new()
///     .with_endpoint("https://hub.example.org")
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct HubClientConfig {
    /// Base URL of the Hub (no trailing `/api`)
    pub(crate) endpoint: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Optional authentication token for private or gated repositories
    pub(crate) token: Option<String>,
}

impl Default for HubClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("evalkit-hf/", env!("CARGO_PKG_VERSION")).to_string(),
            token: None,
        }
    }
}

impl HubClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Hub endpoint.
    ///
    /// Defaults to `https://huggingface.co`.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set an optional authentication token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}
