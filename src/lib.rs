//! # asset-sync
//!
//! A client for syncing cloud inventory into a JSON:API asset-management
//! service, built around a generic resource-mapping layer: one polymorphic
//! [`Entity`] type models every resource kind (organizations,
//! configurations, interfaces, locations, statuses, types) through a string
//! discriminator and a dynamic attribute bag, with no hand-written
//! per-resource code.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiConfig`] and validated newtypes
//! - An authenticated JSON:API [`Transport`] with pagination following and
//!   bracketed filter encoding
//! - The [`Entity`] layer: CRUD, relationship nesting, parent-scoped paths,
//!   and idempotent find-or-create semantics
//! - Attribute [`translate`]-ors mapping inventory records to target
//!   attributes
//! - [`sync`] workflows that upsert whole batches of records through a
//!   bounded worker pool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use asset_sync::sync::{import_instances, resolve_organization, Importer, DEFAULT_BATCH_SIZE};
//! use asset_sync::{ApiConfig, Transport};
//!
//! # async fn run(instances: Vec<asset_sync::source::ComputeInstance>)
//! # -> Result<(), Box<dyn std::error::Error>> {
//! // Credentials come from ASSET_SYNC_API_KEY / ASSET_SYNC_API_URL.
//! let config = ApiConfig::from_env()?;
//! let transport = Arc::new(Transport::new(&config));
//!
//! let organization = resolve_organization(&transport, "Acme Corp").await?;
//! let importer = Importer::bootstrap(Arc::clone(&transport), &organization, "EC2", true).await?;
//!
//! let report = import_instances(Arc::new(importer), instances, DEFAULT_BATCH_SIZE).await;
//! println!("synced {} records, {} failures", report.synced, report.failures.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Querying Resources
//!
//! ```rust,no_run
//! use asset_sync::{ApiConfig, Entity, Transport};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Transport::new(&ApiConfig::from_env()?);
//!
//! // List every configuration in an organization.
//! let organization = Entity::find(&transport, "organizations", "9", None).await?;
//! let configurations = Entity::get(&transport, "configurations", Some(&organization)).await?;
//!
//! // Idempotent upsert by attributes.
//! let mut attributes = asset_sync::Attributes::new();
//! attributes.insert("name".to_string(), json!("Active"));
//! let status =
//!     Entity::first_or_create(&transport, "configuration_statuses", None, attributes).await?;
//! assert!(status.is_persisted());
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the transport is constructed once from
//!   configuration and passed explicitly into every operation
//! - **Fail-fast validation**: credentials, endpoints, and locally-set
//!   attribute names are validated before any request is made
//! - **Server-authoritative state**: every successful write reloads the
//!   entity wholesale from the response body
//! - **Thread-safe**: all shared types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod client;
pub mod config;
pub mod error;
pub mod resource;
pub mod source;
pub mod sync;
pub mod translate;

// Re-export public types at crate root for convenience
pub use client::{Document, ResourceObject, ResponseError, Transport, TransportError};
pub use config::{ApiConfig, ApiConfigBuilder, ApiKey, BaseUrl};
pub use error::ConfigError;
pub use resource::{Attributes, Entity, Kind, PathError, Relationships, ResourceError};
pub use sync::{Importer, LocationCache, SyncError, SyncFailure, SyncReport};
pub use translate::{TranslationError, Translator, TranslatorOptions};
