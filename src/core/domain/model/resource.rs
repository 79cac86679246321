//! Domain models for Proxmox guests (containers and virtual machines).
//!
//! The per-node listings (`/nodes/{node}/lxc`, `/nodes/{node}/qemu`) do not say
//! which kind or node an entry belongs to; both are injected when the listings
//! are flattened into [`Resource`]s.

use crate::core::domain::error::ValidationError;
use crate::core::domain::value_object::serde_helpers;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The kind of guest. Guest-agent operations only exist for [`ResourceKind::Qemu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// An LXC container.
    Lxc,
    /// A QEMU virtual machine.
    Qemu,
}

impl ResourceKind {
    /// The path segment used by the Proxmox API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Lxc => "lxc",
            ResourceKind::Qemu => "qemu",
        }
    }

    /// Returns true if this kind can run commands through the QEMU guest agent.
    pub fn supports_guest_agent(&self) -> bool {
        matches!(self, ResourceKind::Qemu)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lxc" => Ok(ResourceKind::Lxc),
            "qemu" => Ok(ResourceKind::Qemu),
            other => Err(ValidationError::Field {
                field: "type".to_string(),
                message: format!("Unknown resource type '{other}', expected lxc or qemu"),
            }),
        }
    }
}

/// A power-state transition accepted by `/status/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    Start,
    Stop,
    Shutdown,
    Reboot,
}

impl PowerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerAction::Start => "start",
            PowerAction::Stop => "stop",
            PowerAction::Shutdown => "shutdown",
            PowerAction::Reboot => "reboot",
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(PowerAction::Start),
            "stop" => Ok(PowerAction::Stop),
            "shutdown" => Ok(PowerAction::Shutdown),
            "reboot" => Ok(PowerAction::Reboot),
            other => Err(ValidationError::Field {
                field: "action".to_string(),
                message: format!(
                    "Unknown action '{other}', expected start, stop, shutdown or reboot"
                ),
            }),
        }
    }
}

/// One entry of a per-node container or VM listing, before flattening.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuestListItem {
    /// The guest identifier (unique per cluster).
    #[serde(deserialize_with = "serde_helpers::vmid::deserialize")]
    pub vmid: u32,
    /// Human-readable name. Proxmox omits it for some unnamed VMs.
    #[serde(default)]
    pub name: String,
    /// Current status (e.g., "running", "stopped").
    #[serde(default)]
    pub status: String,
    /// Every other field of the upstream payload (cpu, mem, uptime, tags, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A container or VM tagged with its kind and owning node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Resource {
    pub vmid: u32,
    pub name: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub node: String,
    /// Upstream fields passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource {
    /// Tags a listing entry with its kind and node.
    pub fn from_listing(item: GuestListItem, kind: ResourceKind, node: &str) -> Self {
        let mut extra = item.extra;
        // The flattened keys below are authoritative.
        extra.remove("type");
        extra.remove("node");
        Self {
            vmid: item.vmid,
            name: item.name,
            status: item.status,
            kind,
            node: node.to_string(),
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_listing_injects_kind_and_node() {
        let item: GuestListItem = serde_json::from_value(serde_json::json!({
            "vmid": "105",
            "name": "pihole",
            "status": "running",
            "cpu": 0.02,
            "maxmem": 536870912_u64
        }))
        .unwrap();

        let resource = Resource::from_listing(item, ResourceKind::Lxc, "pve2");
        assert_eq!(resource.vmid, 105);
        assert_eq!(resource.kind, ResourceKind::Lxc);
        assert_eq!(resource.node, "pve2");
        assert_eq!(resource.status, "running");

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["type"], "lxc");
        assert_eq!(json["node"], "pve2");
        assert_eq!(json["maxmem"], 536870912_u64);
    }

    #[test]
    fn test_kind_and_action_parsing() {
        assert_eq!("qemu".parse::<ResourceKind>().unwrap(), ResourceKind::Qemu);
        assert!("vm".parse::<ResourceKind>().is_err());
        assert_eq!(
            "shutdown".parse::<PowerAction>().unwrap(),
            PowerAction::Shutdown
        );
        assert!("reset".parse::<PowerAction>().is_err());
        assert!(ResourceKind::Qemu.supports_guest_agent());
        assert!(!ResourceKind::Lxc.supports_guest_agent());
    }
}
