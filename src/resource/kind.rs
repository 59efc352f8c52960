//! Resource kind discriminators.
//!
//! Every remote resource is identified by a string discriminator on the
//! wire. The known kinds additionally declare their writable attribute
//! names, so a locally mistyped attribute fails before a request is made.
//! Attributes arriving from the server are always accepted regardless of the
//! declaration, and unknown kinds ([`Kind::Other`]) carry no declaration at
//! all.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const ORGANIZATION_ATTRIBUTES: &[&str] = &[
    "name",
    "alert",
    "description",
    "quick_notes",
    "organization_type_id",
    "organization_status_id",
];

const CONFIGURATION_ATTRIBUTES: &[&str] = &[
    "name",
    "serial_number",
    "asset_tag",
    "hostname",
    "primary_ip",
    "default_gateway",
    "mac_address",
    "notes",
    "purchased_at",
    "installed_at",
    "warranty_expires_at",
    "organization_id",
    "location_id",
    "configuration_type_id",
    "configuration_status_id",
    "contact_id",
];

const CONFIGURATION_INTERFACE_ATTRIBUTES: &[&str] = &[
    "name",
    "ip_address",
    "mac_address",
    "primary_ip",
    "primary",
    "notes",
    "configuration_id",
];

const LOCATION_ATTRIBUTES: &[&str] = &[
    "name",
    "address_1",
    "address_2",
    "city",
    "postal_code",
    "region_id",
    "country_id",
    "phone",
    "fax",
    "notes",
    "primary",
    "organization_id",
];

const NAME_ONLY_ATTRIBUTES: &[&str] = &["name"];

/// A resource kind: the wire-level `type` discriminator.
///
/// # Example
///
/// ```rust
/// use asset_sync::Kind;
///
/// let kind = Kind::from("configurations");
/// assert_eq!(kind, Kind::Configurations);
/// assert!(kind.declares("serial_number"));
/// assert!(!kind.declares("serial_numbre"));
///
/// // Unknown kinds pass through and accept any attribute.
/// let kind = Kind::from("passwords");
/// assert!(matches!(kind, Kind::Other(_)));
/// assert!(kind.declares("anything"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Organizations owning all other resources.
    Organizations,
    /// Configurations: the synced asset records.
    Configurations,
    /// Network interfaces nested under a configuration.
    ConfigurationInterfaces,
    /// Configuration statuses (e.g. Active, Inactive).
    ConfigurationStatuses,
    /// Configuration types (e.g. server, desktop).
    ConfigurationTypes,
    /// Physical or logical locations within an organization.
    Locations,
    /// Any other kind the server knows about; no attribute declaration.
    Other(String),
}

impl Kind {
    /// Returns the wire-level type string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Organizations => "organizations",
            Self::Configurations => "configurations",
            Self::ConfigurationInterfaces => "configuration_interfaces",
            Self::ConfigurationStatuses => "configuration_statuses",
            Self::ConfigurationTypes => "configuration_types",
            Self::Locations => "locations",
            Self::Other(kind) => kind,
        }
    }

    /// Returns the declared writable attribute names for this kind, or
    /// `None` when the kind carries no declaration.
    #[must_use]
    pub const fn declared_attributes(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Organizations => Some(ORGANIZATION_ATTRIBUTES),
            Self::Configurations => Some(CONFIGURATION_ATTRIBUTES),
            Self::ConfigurationInterfaces => Some(CONFIGURATION_INTERFACE_ATTRIBUTES),
            Self::ConfigurationStatuses | Self::ConfigurationTypes => Some(NAME_ONLY_ATTRIBUTES),
            Self::Locations => Some(LOCATION_ATTRIBUTES),
            Self::Other(_) => None,
        }
    }

    /// Returns whether `attribute` may be written locally for this kind.
    ///
    /// Kinds without a declaration accept every attribute.
    #[must_use]
    pub fn declares(&self, attribute: &str) -> bool {
        self.declared_attributes()
            .map_or(true, |attributes| attributes.contains(&attribute))
    }
}

impl From<&str> for Kind {
    fn from(kind: &str) -> Self {
        match kind {
            "organizations" => Self::Organizations,
            "configurations" => Self::Configurations,
            "configuration_interfaces" => Self::ConfigurationInterfaces,
            "configuration_statuses" => Self::ConfigurationStatuses,
            "configuration_types" => Self::ConfigurationTypes,
            "locations" => Self::Locations,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Kind {
    fn from(kind: String) -> Self {
        Self::from(kind.as_str())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}
