//! Inventory source records.
//!
//! Plain deserializable record types produced by cloud inventory sources.
//! The sources themselves (SDK calls, API paging) live outside this crate;
//! callers hand over batches of these records and the
//! [`sync`](crate::sync) layer takes it from there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A key/value tag attached to a compute instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag key (e.g., "Name").
    pub key: String,
    /// The tag value; may be absent.
    #[serde(default)]
    pub value: Option<String>,
}

/// Where a compute instance is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The availability zone, when reported.
    #[serde(default)]
    pub availability_zone: Option<String>,
}

/// One network interface attached to a compute instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// The interface identifier.
    pub interface_id: String,
    /// The interface's private IP address.
    #[serde(default)]
    pub private_ip_address: Option<String>,
    /// The interface's MAC address.
    #[serde(default)]
    pub mac_address: Option<String>,
    /// The VPC the interface lives in.
    #[serde(default)]
    pub vpc_id: Option<String>,
    /// The subnet the interface lives in.
    #[serde(default)]
    pub subnet_id: Option<String>,
}

/// One compute instance as reported by the inventory source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeInstance {
    /// The instance identifier.
    pub instance_id: String,
    /// The SSH key pair name, when assigned.
    #[serde(default)]
    pub key_name: Option<String>,
    /// The instance's primary private IP address.
    #[serde(default)]
    pub private_ip_address: Option<String>,
    /// The instance state name (e.g., "running", "stopped").
    pub state: String,
    /// Tags attached to the instance.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// When the instance was launched.
    pub launch_time: DateTime<Utc>,
    /// The instance type name.
    #[serde(default)]
    pub instance_type: Option<String>,
    /// The public DNS name, when assigned.
    #[serde(default)]
    pub public_dns_name: Option<String>,
    /// The private DNS name, when assigned.
    #[serde(default)]
    pub private_dns_name: Option<String>,
    /// The machine image the instance was launched from.
    #[serde(default)]
    pub image_id: Option<String>,
    /// Names of the security groups attached to the instance.
    #[serde(default)]
    pub security_groups: Vec<String>,
    /// Instance placement details.
    #[serde(default)]
    pub placement: Option<Placement>,
    /// Network interfaces attached to the instance.
    #[serde(default)]
    pub network_interfaces: Vec<NetworkInterface>,
}

impl ComputeInstance {
    /// Returns the interface whose private IP matches the instance's
    /// primary private IP, when there is one.
    #[must_use]
    pub fn primary_interface(&self) -> Option<&NetworkInterface> {
        let primary_ip = self.private_ip_address.as_deref()?;
        self.network_interfaces
            .iter()
            .find(|interface| interface.private_ip_address.as_deref() == Some(primary_ip))
    }
}

/// Sizing and mode properties of a virtual desktop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopProperties {
    /// The compute type name (e.g., "STANDARD").
    #[serde(default)]
    pub compute_type_name: Option<String>,
    /// Root volume size in GiB.
    #[serde(default)]
    pub root_volume_size_gib: Option<u64>,
    /// User volume size in GiB.
    #[serde(default)]
    pub user_volume_size_gib: Option<u64>,
    /// The running mode (e.g., "AUTO_STOP").
    #[serde(default)]
    pub running_mode: Option<String>,
    /// Auto-stop timeout in minutes, when in auto-stop mode.
    #[serde(default)]
    pub running_mode_auto_stop_timeout_in_minutes: Option<u64>,
}

/// One virtual desktop as reported by the inventory source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDesktop {
    /// The desktop identifier.
    pub desktop_id: String,
    /// The desktop's computer name, when assigned.
    #[serde(default)]
    pub computer_name: Option<String>,
    /// The desktop state name (e.g., "AVAILABLE", "STOPPED").
    #[serde(default)]
    pub state: String,
    /// The desktop's IP address, when assigned.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// The bundle the desktop was provisioned from.
    #[serde(default)]
    pub bundle_id: Option<String>,
    /// The subnet the desktop lives in.
    #[serde(default)]
    pub subnet_id: Option<String>,
    /// The directory the desktop is joined to.
    #[serde(default)]
    pub directory_id: Option<String>,
    /// The last provisioning error code, when any.
    #[serde(default)]
    pub error_code: Option<String>,
    /// The last provisioning error message, when any.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Sizing and mode properties.
    #[serde(default)]
    pub properties: DesktopProperties,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_interface_matches_instance_private_ip() {
        let instance = ComputeInstance {
            instance_id: "i-1".to_string(),
            key_name: None,
            private_ip_address: Some("10.0.0.5".to_string()),
            state: "running".to_string(),
            tags: Vec::new(),
            launch_time: Utc::now(),
            instance_type: None,
            public_dns_name: None,
            private_dns_name: None,
            image_id: None,
            security_groups: Vec::new(),
            placement: None,
            network_interfaces: vec![
                NetworkInterface {
                    interface_id: "eni-a".to_string(),
                    private_ip_address: Some("10.0.0.9".to_string()),
                    ..NetworkInterface::default()
                },
                NetworkInterface {
                    interface_id: "eni-b".to_string(),
                    private_ip_address: Some("10.0.0.5".to_string()),
                    ..NetworkInterface::default()
                },
            ],
        };

        assert_eq!(
            instance.primary_interface().map(|i| i.interface_id.as_str()),
            Some("eni-b")
        );
    }

    #[test]
    fn test_primary_interface_is_none_without_private_ip() {
        let instance = ComputeInstance {
            instance_id: "i-1".to_string(),
            key_name: None,
            private_ip_address: None,
            state: "stopped".to_string(),
            tags: Vec::new(),
            launch_time: Utc::now(),
            instance_type: None,
            public_dns_name: None,
            private_dns_name: None,
            image_id: None,
            security_groups: Vec::new(),
            placement: None,
            network_interfaces: Vec::new(),
        };
        assert!(instance.primary_interface().is_none());
    }

    #[test]
    fn test_records_deserialize_with_defaults() {
        let desktop: VirtualDesktop = serde_json::from_str(
            r#"{"desktop_id": "ws-1", "state": "AVAILABLE"}"#,
        )
        .unwrap();
        assert_eq!(desktop.desktop_id, "ws-1");
        assert_eq!(desktop.ip_address, None);
        assert_eq!(desktop.properties, DesktopProperties::default());
    }
}
