//! Transport-level error types.
//!
//! # Error Handling
//!
//! - [`ResponseError`]: any non-2xx HTTP response, carrying the status code
//!   and the raw body for diagnostics. Never retried automatically; the
//!   caller decides.
//! - [`TransportError`]: unified error type for transport operations.

use thiserror::Error;

/// Error returned when a request receives a response outside the 2xx range.
///
/// The raw body is preserved verbatim so callers can inspect the service's
/// error document.
#[derive(Debug, Error)]
#[error("Request failed with response code {code} and body {body}")]
pub struct ResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
}

/// Unified error type for transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A non-2xx HTTP response.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not a valid JSON:API document.
    #[error("Malformed response document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A single resource object was expected but a collection arrived.
    #[error("Expected a single resource object but received a collection")]
    UnexpectedCollection,
}

impl TransportError {
    /// Returns the HTTP status code when the error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(error) => Some(error.code),
            _ => None,
        }
    }
}

// Verify TransportError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
};
