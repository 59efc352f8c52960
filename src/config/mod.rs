//! Configuration types for the asset-sync client.
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: the configuration holding credentials and the endpoint
//! - [`ApiConfigBuilder`]: a builder for constructing [`ApiConfig`] instances
//! - [`ApiKey`]: a validated API key newtype with masked debug output
//! - [`BaseUrl`]: a validated service endpoint URL
//!
//! There is no process-wide configuration: every [`Transport`](crate::Transport)
//! is constructed from an explicit `ApiConfig` instance.
//!
//! # Example
//!
//! ```rust
//! use asset_sync::{ApiConfig, ApiKey, BaseUrl};
//!
//! let config = ApiConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use crate::error::ConfigError;

/// Environment variable holding the API key for [`ApiConfig::from_env`].
pub const ENV_API_KEY: &str = "ASSET_SYNC_API_KEY";

/// Environment variable holding the base URL for [`ApiConfig::from_env`].
pub const ENV_API_URL: &str = "ASSET_SYNC_API_URL";

/// Configuration for the asset-sync client.
///
/// Holds the API credential and the service endpoint. Both are validated on
/// construction, so a `Transport` built from an `ApiConfig` can never issue
/// an unauthenticated request.
///
/// # Thread Safety
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Builds a configuration from the `ASSET_SYNC_API_KEY` and
    /// `ASSET_SYNC_API_URL` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if either variable is unset,
    /// or the underlying validation error if a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key = std::env::var(ENV_API_KEY)
            .map_err(|_| ConfigError::MissingEnvVar { var: ENV_API_KEY })?;
        let url = std::env::var(ENV_API_URL)
            .map_err(|_| ConfigError::MissingEnvVar { var: ENV_API_URL })?;
        Ok(Self {
            api_key: ApiKey::new(key)?,
            base_url: BaseUrl::new(url)?,
            user_agent_prefix: None,
        })
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// Required fields are `api_key` and `base_url`.
///
/// # Example
///
/// ```rust
/// use asset_sync::{ApiConfig, ApiKey, BaseUrl};
///
/// let config = ApiConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .base_url(BaseUrl::new("https://api.example.com").unwrap())
///     .user_agent_prefix("MyImporter/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `base_url` are not set.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(ApiConfig {
            api_key,
            base_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
