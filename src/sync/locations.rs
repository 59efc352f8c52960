//! Per-run location memoization.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::client::Transport;
use crate::resource::{Attributes, Entity, Kind, ResourceError};

/// Per-run cache of location entities keyed by location name.
///
/// One mutex guards the map and is held across the whole find-or-create, so
/// concurrent workers resolving the same name are serialized and at most one
/// create is issued per name per run. The cache lives for a single run and
/// is never shared across runs or processes; independent processes can still
/// race each other (see [`Entity::first_or_create`]).
#[derive(Debug, Default)]
pub struct LocationCache {
    inner: Mutex<HashMap<String, Entity>>,
}

impl LocationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the location named in `attributes`, consulting the cache
    /// first and falling back to a find-or-create scoped to the
    /// organization.
    ///
    /// # Errors
    ///
    /// Propagates [`ResourceError`] from the lookup or create.
    pub async fn resolve(
        &self,
        transport: &Transport,
        organization_id: &str,
        attributes: Attributes,
    ) -> Result<Entity, ResourceError> {
        let name = attributes
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut cache = self.inner.lock().await;
        if let Some(found) = cache.get(&name) {
            return Ok(found.clone());
        }

        let mut attributes = attributes;
        attributes.insert(
            "organization_id".to_string(),
            Value::String(organization_id.to_string()),
        );
        let location =
            Entity::first_or_create(transport, Kind::Locations, None, attributes).await?;
        cache.insert(name, location.clone());
        Ok(location)
    }
}
