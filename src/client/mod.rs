//! HTTP transport for the JSON:API service.
//!
//! This module provides the [`Transport`] type for making authenticated
//! requests against the target service and normalizing its JSON:API envelope
//! into [`Document`] values, plus the parameter-encoding and error types the
//! transport is built from.
//!
//! # Overview
//!
//! - [`Transport`]: authenticated GET/POST/PATCH with pagination following
//! - [`Document`] / [`ResourceObject`]: normalized response data
//! - [`flatten_params`]: bracketed query-parameter encoding
//! - [`TransportError`] / [`ResponseError`]: failure taxonomy
//!
//! The transport is an explicit object constructed from an
//! [`ApiConfig`](crate::ApiConfig) and passed by reference wherever requests
//! are made; there is no process-wide shared instance.

mod envelope;
mod errors;
mod params;
mod transport;

pub use envelope::{Document, ResourceObject};
pub use errors::{ResponseError, TransportError};
pub use params::{flatten_params, is_falsy};
pub use transport::{Transport, CLIENT_VERSION, CONTENT_TYPE};
