//! Upsert orchestration.
//!
//! Turns batches of inventory records into configurations and configuration
//! interfaces on the remote service:
//!
//! - [`resolve_organization`]: find the owning organization by id or name
//! - [`Importer`]: per-run context (statuses, configuration type, location
//!   cache) plus the per-record workflows
//! - [`run_in_batches`]: bounded fan-out with a batch-join barrier
//! - [`import_instances`] / [`import_desktops`]: batch drivers producing a
//!   [`SyncReport`]
//!
//! # Failure isolation
//!
//! A failed record is logged and skipped; sibling workers, later batches,
//! and records already written are untouched. There is no rollback.
//!
//! # Concurrency
//!
//! Within one workflow every transport call is sequential. Across workers
//! the only coordinated state is the [`LocationCache`]: creates of a given
//! location name are serialized through its lock, so one run creates each
//! location at most once. Everything else relies on
//! [`Entity::first_or_create`], whose duplicate-create race across
//! independent processes is a documented limitation.

mod locations;
mod pool;

pub use locations::LocationCache;
pub use pool::run_in_batches;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::client::{is_falsy, Transport};
use crate::resource::{Attributes, Entity, Kind, ResourceError};
use crate::source::{ComputeInstance, NetworkInterface, VirtualDesktop};
use crate::translate::{
    DesktopTranslator, InstanceTranslator, InterfaceTranslator, PlacementTranslator,
    TranslationError, Translator, TranslatorOptions,
};

/// How many records run concurrently per batch by default.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Status name assigned to running/available records.
pub const ACTIVE_STATUS: &str = "Active";

/// Status name assigned to all other records.
pub const INACTIVE_STATUS: &str = "Inactive";

/// Errors raised by the sync workflows.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No organization matched the given name.
    #[error("organization '{name}' not found")]
    OrganizationNotFound {
        /// The name that was searched for.
        name: String,
    },

    /// A bootstrapped entity came back from the server without an id.
    #[error("{kind} was persisted without an id")]
    MissingServerId {
        /// The entity's kind.
        kind: String,
    },

    /// A resource operation failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// An attribute derivation failed.
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

/// One skipped record and the failure that skipped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    /// The source record identifier.
    pub record: String,
    /// The rendered failure.
    pub error: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Records synced successfully.
    pub synced: usize,
    /// Records that failed and were skipped.
    pub failures: Vec<SyncFailure>,
}

/// Finds the owning organization by numeric id or by name.
///
/// An all-digit argument is treated as an id and fetched directly; anything
/// else is matched against the organization name filter, taking the first
/// result.
///
/// # Errors
///
/// Returns [`SyncError::OrganizationNotFound`] when a name matches nothing,
/// or the underlying [`ResourceError`] (including `NotFound` for a missing
/// id).
pub async fn resolve_organization(
    transport: &Transport,
    id_or_name: &str,
) -> Result<Entity, SyncError> {
    if !id_or_name.is_empty() && id_or_name.chars().all(|c| c.is_ascii_digit()) {
        return Ok(Entity::find(transport, Kind::Organizations, id_or_name, None).await?);
    }
    let mut filters = Attributes::new();
    filters.insert(
        "name".to_string(),
        Value::String(id_or_name.to_string()),
    );
    Entity::find_by(transport, Kind::Organizations, None, &filters)
        .await?
        .ok_or_else(|| SyncError::OrganizationNotFound {
            name: id_or_name.to_string(),
        })
}

/// Per-run sync context and workflows.
///
/// Bootstrapping resolves (or creates) the `Active`/`Inactive` statuses and
/// the named configuration type once; every record workflow then reuses
/// their ids. The importer is shared across workers behind an [`Arc`].
#[derive(Debug)]
pub struct Importer {
    transport: Arc<Transport>,
    organization_id: String,
    configuration_type_id: String,
    options: TranslatorOptions,
    locations: LocationCache,
    import_locations: bool,
}

impl Importer {
    /// Builds the per-run context for syncing into `organization`.
    ///
    /// Issues the status and configuration-type find-or-creates up front.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when the organization is unpersisted or a
    /// bootstrap find-or-create fails.
    pub async fn bootstrap(
        transport: Arc<Transport>,
        organization: &Entity,
        type_name: &str,
        import_locations: bool,
    ) -> Result<Self, SyncError> {
        let organization_id = require_id(organization)?;

        let active = Self::ensure_named(&transport, Kind::ConfigurationStatuses, ACTIVE_STATUS).await?;
        let inactive =
            Self::ensure_named(&transport, Kind::ConfigurationStatuses, INACTIVE_STATUS).await?;
        let configuration_type =
            Self::ensure_named(&transport, Kind::ConfigurationTypes, type_name).await?;

        let options =
            TranslatorOptions::with_status_ids(require_id(&active)?, require_id(&inactive)?);

        Ok(Self {
            transport,
            organization_id,
            configuration_type_id: require_id(&configuration_type)?,
            options,
            locations: LocationCache::new(),
            import_locations,
        })
    }

    /// Returns the owning organization's id.
    #[must_use]
    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    /// Returns the configuration type id every synced record is tagged
    /// with.
    #[must_use]
    pub fn configuration_type_id(&self) -> &str {
        &self.configuration_type_id
    }

    /// Syncs one compute instance: resolve its location, translate it,
    /// find-or-build the matching configuration, overwrite its attributes,
    /// save it, then sync every attached network interface.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on any translation or resource failure; records
    /// already written stay written.
    pub async fn sync_instance(&self, instance: &ComputeInstance) -> Result<Entity, SyncError> {
        let location = self.resolve_location(instance).await?;
        let attributes =
            InstanceTranslator::new(instance, self.options.clone()).translated()?;

        let mut configuration = self.find_or_build_configuration(&attributes).await?;
        if let Some(location_id) = location.as_ref().and_then(Entity::id) {
            configuration.set_attr("location_id", location_id)?;
        }
        configuration.set_attr("configuration_type_id", self.configuration_type_id.as_str())?;
        configuration.set_attributes(attributes)?;
        configuration.save(&self.transport, None).await?;

        for interface in &instance.network_interfaces {
            let primary = instance.private_ip_address.is_some()
                && instance.private_ip_address == interface.private_ip_address;
            self.sync_interface(&configuration, interface, primary).await?;
        }
        Ok(configuration)
    }

    /// Syncs one virtual desktop: translate it, find-or-build the matching
    /// configuration, save it, then sync its single interface when the
    /// desktop reports an IP address.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on any translation or resource failure.
    pub async fn sync_desktop(&self, desktop: &VirtualDesktop) -> Result<Entity, SyncError> {
        let mut attributes =
            DesktopTranslator::new(desktop, self.options.clone()).translated()?;
        // The ip fields belong on the configuration interface.
        let ip_address = attributes.remove("ip_address").unwrap_or(Value::Null);
        let ip_notes = attributes.remove("ip_notes").unwrap_or(Value::Null);

        let mut configuration = self.find_or_build_configuration(&attributes).await?;
        configuration.set_attr("configuration_type_id", self.configuration_type_id.as_str())?;
        configuration.set_attributes(attributes)?;
        configuration.save(&self.transport, None).await?;

        if let Some(ip) = ip_address.as_str().filter(|ip| !ip.is_empty()) {
            let mut lookup = Attributes::new();
            if let Some(configuration_id) = configuration.id() {
                lookup.insert(
                    "configuration_id".to_string(),
                    Value::String(configuration_id.to_string()),
                );
            }
            lookup.insert("primary_ip".to_string(), Value::String(ip.to_string()));

            let mut interface = Entity::first_or_initialize(
                &self.transport,
                Kind::ConfigurationInterfaces,
                Some(&configuration),
                lookup,
            )
            .await?;
            interface.set_attr("primary", true)?;
            interface.set_attr("ip_address", ip)?;
            if !is_falsy(&ip_notes) {
                interface.set_attr("notes", ip_notes.clone())?;
            }
            interface.save(&self.transport, None).await?;
        }
        Ok(configuration)
    }

    /// Resolves the location for an instance through the per-run cache.
    ///
    /// Returns `None` when location import is off or the instance reports no
    /// availability zone.
    async fn resolve_location(
        &self,
        instance: &ComputeInstance,
    ) -> Result<Option<Entity>, SyncError> {
        if !self.import_locations {
            return Ok(None);
        }
        let Some(placement) = &instance.placement else {
            return Ok(None);
        };
        let attributes = PlacementTranslator::new(placement).translated()?;
        if attributes.get("name").map_or(true, is_falsy) {
            return Ok(None);
        }
        let location = self
            .locations
            .resolve(&self.transport, &self.organization_id, attributes)
            .await?;
        Ok(Some(location))
    }

    /// Finds the configuration matching the translated attributes within
    /// the organization, or builds a fresh one.
    ///
    /// Matching is on `organization_id` and `name`, narrowed by
    /// `serial_number` when the translation produced one. The first remote
    /// match wins.
    async fn find_or_build_configuration(
        &self,
        attributes: &Attributes,
    ) -> Result<Entity, SyncError> {
        let mut filters = Attributes::new();
        filters.insert(
            "organization_id".to_string(),
            Value::String(self.organization_id.clone()),
        );
        if let Some(name) = attributes.get("name") {
            filters.insert("name".to_string(), name.clone());
        }
        if let Some(serial) = attributes.get("serial_number").filter(|v| !is_falsy(v)) {
            filters.insert("serial_number".to_string(), serial.clone());
        }

        match Entity::find_by(&self.transport, Kind::Configurations, None, &filters).await? {
            Some(existing) => Ok(existing),
            None => {
                let mut configuration = Entity::new(Kind::Configurations);
                configuration.set_attr("organization_id", self.organization_id.as_str())?;
                Ok(configuration)
            }
        }
    }

    /// Finds-or-initializes the interface scoped to its configuration, then
    /// overwrites its attributes and saves.
    async fn sync_interface(
        &self,
        configuration: &Entity,
        interface: &NetworkInterface,
        primary: bool,
    ) -> Result<(), SyncError> {
        let attributes = InterfaceTranslator::new(interface).translated()?;

        let mut lookup = Attributes::new();
        if let Some(configuration_id) = configuration.id() {
            lookup.insert(
                "configuration_id".to_string(),
                Value::String(configuration_id.to_string()),
            );
        }
        if let Some(primary_ip) = &interface.private_ip_address {
            lookup.insert("primary_ip".to_string(), Value::String(primary_ip.clone()));
        }

        let mut entity = Entity::first_or_initialize(
            &self.transport,
            Kind::ConfigurationInterfaces,
            Some(configuration),
            lookup,
        )
        .await?;
        entity.set_attr("primary", primary)?;
        entity.set_attributes(attributes)?;
        entity.save(&self.transport, None).await?;
        Ok(())
    }

    async fn ensure_named(
        transport: &Transport,
        kind: Kind,
        name: &str,
    ) -> Result<Entity, SyncError> {
        let mut attributes = Attributes::new();
        attributes.insert("name".to_string(), Value::String(name.to_string()));
        Ok(Entity::first_or_create(transport, kind, None, attributes).await?)
    }
}

fn require_id(entity: &Entity) -> Result<String, SyncError> {
    entity
        .id()
        .map(ToString::to_string)
        .ok_or_else(|| SyncError::MissingServerId {
            kind: entity.kind().to_string(),
        })
}

/// Syncs a batch of compute instances, fanning out in batches of
/// `batch_size` and reporting per-record outcomes.
pub async fn import_instances(
    importer: Arc<Importer>,
    instances: Vec<ComputeInstance>,
    batch_size: usize,
) -> SyncReport {
    let results = run_in_batches(instances, batch_size, |instance| {
        let importer = Arc::clone(&importer);
        async move {
            let record = instance.instance_id.clone();
            let outcome = importer.sync_instance(&instance).await;
            (record, outcome)
        }
    })
    .await;
    collect_report(results)
}

/// Syncs a batch of virtual desktops, fanning out in batches of
/// `batch_size` and reporting per-record outcomes.
pub async fn import_desktops(
    importer: Arc<Importer>,
    desktops: Vec<VirtualDesktop>,
    batch_size: usize,
) -> SyncReport {
    let results = run_in_batches(desktops, batch_size, |desktop| {
        let importer = Arc::clone(&importer);
        async move {
            let record = desktop.desktop_id.clone();
            let outcome = importer.sync_desktop(&desktop).await;
            (record, outcome)
        }
    })
    .await;
    collect_report(results)
}

fn collect_report(results: Vec<(String, Result<Entity, SyncError>)>) -> SyncReport {
    let mut report = SyncReport::default();
    for (record, outcome) in results {
        match outcome {
            Ok(_) => report.synced += 1,
            Err(error) => {
                tracing::warn!(record = %record, error = %error, "record sync failed; skipping");
                report.failures.push(SyncFailure {
                    record,
                    error: error.to_string(),
                });
            }
        }
    }
    report
}
