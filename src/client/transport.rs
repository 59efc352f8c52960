//! Authenticated HTTP transport.
//!
//! [`Transport`] issues GET/POST/PATCH requests against the configured
//! service and normalizes the JSON:API envelope into [`Document`] values,
//! following pagination links on collection responses.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::client::envelope::{data_wrap, Envelope, EnvelopeData};
use crate::client::errors::{ResponseError, TransportError};
use crate::client::params::flatten_params;
use crate::client::{Document, ResourceObject};
use crate::config::ApiConfig;

/// Library version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON:API media type used for requests and responses.
pub const CONTENT_TYPE: &str = "application/vnd.api+json";

/// HTTP transport for the JSON:API service.
///
/// The transport handles:
/// - URL construction against the configured base endpoint
/// - Default headers including the API key and User-Agent
/// - JSON:API envelope parsing and pagination following
/// - Mapping non-2xx responses to [`ResponseError`]
///
/// Requests are strictly sequential and blocking from the caller's point of
/// view: each call awaits its full response (including any pagination
/// follow-ups) before returning. Failed requests are not retried.
///
/// # Thread Safety
///
/// `Transport` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,no_run
/// use asset_sync::{ApiConfig, ApiKey, BaseUrl, Transport};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig::builder()
///     .api_key(ApiKey::new("my-api-key")?)
///     .base_url(BaseUrl::new("https://api.example.com")?)
///     .build()?;
///
/// let transport = Transport::new(&config);
/// let document = transport.get("/organizations", None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Transport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The configured service endpoint.
    base_url: crate::config::BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify Transport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Transport>();
};

impl Transport {
    /// Creates a new transport from a validated configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Asset Sync Library v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("Content-Type".to_string(), CONTENT_TYPE.to_string());
        default_headers.insert("Accept".to_string(), CONTENT_TYPE.to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert(
            "x-api-key".to_string(),
            config.api_key().as_ref().to_string(),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &crate::config::BaseUrl {
        &self.base_url
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Issues a GET request and normalizes the response.
    ///
    /// Single-object responses are returned as-is. Collection responses are
    /// followed through `links.next` while `meta.next-page` is truthy, and
    /// every page's `data` array is appended in page order.
    ///
    /// `params` are flattened with [`flatten_params`], so nested filter maps
    /// become bracketed keys and falsy values are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network failure, a non-2xx response, or
    /// a malformed response document.
    pub async fn get(
        &self,
        path: &str,
        params: Option<&Map<String, Value>>,
    ) -> Result<Document, TransportError> {
        let url = self.base_url.join(path);
        let mut request = self.client.get(&url);
        if let Some(params) = params {
            request = request.query(&flatten_params(params));
        }
        let envelope = self.execute(request, &url).await?;

        match envelope.data {
            EnvelopeData::One(object) => Ok(Document::One(object)),
            EnvelopeData::Many(mut objects) => {
                let mut meta = envelope.meta;
                let mut links = envelope.links;
                loop {
                    let next_url = match (&meta, &links) {
                        (Some(meta), Some(links)) if meta.has_next_page() => links.next.clone(),
                        _ => None,
                    };
                    let Some(next_url) = next_url else { break };
                    let page = self.execute(self.client.get(&next_url), &next_url).await?;
                    match page.data {
                        EnvelopeData::Many(items) => objects.extend(items),
                        EnvelopeData::One(object) => objects.push(object),
                    }
                    meta = page.meta;
                    links = page.links;
                }
                Ok(Document::Many(objects))
            }
        }
    }

    /// Issues a POST request with a `data`-wrapped payload.
    ///
    /// When `relationships` are supplied, each entry is merged into the
    /// payload under `relationships.<name>` before wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network failure, a non-2xx response, a
    /// malformed response document, or a collection response where a single
    /// object was expected.
    pub async fn post(
        &self,
        path: &str,
        mut payload: Value,
        relationships: Option<Map<String, Value>>,
    ) -> Result<ResourceObject, TransportError> {
        if let Some(relationships) = relationships.filter(|r| !r.is_empty()) {
            if let Some(object) = payload.as_object_mut() {
                object.insert("relationships".to_string(), Value::Object(relationships));
            }
        }
        let url = self.base_url.join(path);
        let body = data_wrap(payload).to_string();
        let request = self.client.post(&url).body(body);
        let envelope = self.execute(request, &url).await?;
        Self::single(envelope)
    }

    /// Issues a PATCH request with a `data`-wrapped payload.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network failure, a non-2xx response, a
    /// malformed response document, or a collection response where a single
    /// object was expected.
    pub async fn patch(
        &self,
        path: &str,
        payload: Value,
    ) -> Result<ResourceObject, TransportError> {
        let url = self.base_url.join(path);
        let body = data_wrap(payload).to_string();
        let request = self.client.patch(&url).body(body);
        let envelope = self.execute(request, &url).await?;
        Self::single(envelope)
    }

    /// Sends a prepared request and parses the response envelope.
    async fn execute(
        &self,
        mut request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<Envelope, TransportError> {
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }

        tracing::debug!(url, "issuing request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(TransportError::Response(ResponseError {
                code: status.as_u16(),
                body,
            }));
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        Ok(envelope)
    }

    fn single(envelope: Envelope) -> Result<ResourceObject, TransportError> {
        match envelope.data {
            EnvelopeData::One(object) => Ok(object),
            EnvelopeData::Many(_) => Err(TransportError::UnexpectedCollection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, BaseUrl};

    fn create_test_config() -> ApiConfig {
        ApiConfig::builder()
            .api_key(ApiKey::new("test-api-key").unwrap())
            .base_url(BaseUrl::new("https://api.example.com").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_transport_construction_from_config() {
        let transport = Transport::new(&create_test_config());
        assert_eq!(transport.base_url().as_ref(), "https://api.example.com");
    }

    #[test]
    fn test_api_key_header_injection() {
        let transport = Transport::new(&create_test_config());
        assert_eq!(
            transport.default_headers().get("x-api-key"),
            Some(&"test-api-key".to_string())
        );
    }

    #[test]
    fn test_content_type_is_jsonapi() {
        let transport = Transport::new(&create_test_config());
        assert_eq!(
            transport.default_headers().get("Content-Type"),
            Some(&CONTENT_TYPE.to_string())
        );
        assert_eq!(
            transport.default_headers().get("Accept"),
            Some(&CONTENT_TYPE.to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let transport = Transport::new(&create_test_config());
        let user_agent = transport.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Asset Sync Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ApiConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .base_url(BaseUrl::new("https://api.example.com").unwrap())
            .user_agent_prefix("MyImporter/1.0")
            .build()
            .unwrap();
        let transport = Transport::new(&config);

        let user_agent = transport.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyImporter/1.0 | "));
    }

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transport>();
    }
}
