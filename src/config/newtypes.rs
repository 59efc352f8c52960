//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so that invalid
//! credentials or endpoints are rejected with clear error messages before a
//! client ever exists.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API key.
///
/// The key is required to be non-empty. The `Debug` implementation masks the
/// value so the key cannot leak into logs.
///
/// # Example
///
/// ```rust
/// use asset_sync::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated base URL for the target service.
///
/// The URL must carry a scheme and a host. A trailing slash is stripped so
/// that [`BaseUrl::join`] can always append an absolute path.
///
/// # Example
///
/// ```rust
/// use asset_sync::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com");
/// assert_eq!(url.join("/organizations"), "https://api.example.com/organizations");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or
    /// no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let mut url = url.trim().to_string();
        while url.ends_with('/') {
            url.pop();
        }

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if url[host_start..host_end].is_empty() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Appends an absolute resource path to the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        let result = ApiKey::new("");
        assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_masks_value_in_debug() {
        let key = ApiKey::new("super-secret-key").unwrap();
        let debug_output = format!("{:?}", key);
        assert_eq!(debug_output, "ApiKey(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://api.example.com/").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com");
    }

    #[test]
    fn test_base_url_join_appends_path() {
        let url = BaseUrl::new("https://api.example.com").unwrap();
        assert_eq!(
            url.join("/organizations/1"),
            "https://api.example.com/organizations/1"
        );
    }

    #[test]
    fn test_base_url_parses_scheme_and_host() {
        let url = BaseUrl::new("https://api.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "api.example.com");

        // With port
        let url = BaseUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "localhost");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        // No scheme
        assert!(BaseUrl::new("api.example.com").is_err());

        // Empty host
        assert!(BaseUrl::new("https://").is_err());

        // Invalid scheme
        assert!(BaseUrl::new("://example.com").is_err());
    }

    #[test]
    fn test_base_url_round_trip_serialization() {
        let original = BaseUrl::new("https://api.example.com").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#""https://api.example.com""#);
        let restored: BaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
