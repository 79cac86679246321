//! Joins Proxmox guests with tailnet devices by hostname.

use crate::core::domain::model::{resource::Resource, tailscale_device::TailscaleDevice};
use serde::Serialize;

/// A guest with the tailnet device that shares its name, if any.
///
/// Both sides are borrowed; merging never copies or mutates the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergedResource<'a> {
    #[serde(flatten)]
    pub resource: &'a Resource,
    #[serde(rename = "tailscaleDevice", skip_serializing_if = "Option::is_none")]
    pub tailscale_device: Option<&'a TailscaleDevice>,
}

/// Pairs every resource with the first device whose hostname matches its name,
/// ignoring case. Resource order is preserved; device order decides ties.
pub fn merge<'a>(
    resources: &'a [Resource],
    devices: &'a [TailscaleDevice],
) -> Vec<MergedResource<'a>> {
    resources
        .iter()
        .map(|resource| MergedResource {
            resource,
            tailscale_device: devices.iter().find(|d| d.matches_hostname(&resource.name)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::model::resource::ResourceKind;
    use serde_json::Map;

    fn resource(vmid: u32, name: &str) -> Resource {
        Resource {
            vmid,
            name: name.to_string(),
            status: "running".to_string(),
            kind: ResourceKind::Qemu,
            node: "pve1".to_string(),
            extra: Map::new(),
        }
    }

    fn device(hostname: &str, address: &str) -> TailscaleDevice {
        TailscaleDevice {
            hostname: hostname.to_string(),
            addresses: vec![address.to_string()],
            extra: Map::new(),
        }
    }

    #[test]
    fn test_merge_attaches_matching_device() {
        let resources = vec![resource(100, "web")];
        let devices = vec![device("web", "100.1.2.3")];

        let merged = merge(&resources, &devices);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].resource.vmid, 100);
        assert_eq!(
            merged[0].tailscale_device.and_then(|d| d.primary_address()),
            Some("100.1.2.3")
        );
    }

    #[test]
    fn test_earlier_device_wins_case_insensitively() {
        let resources = vec![resource(100, "Web")];
        let devices = vec![
            device("other", "100.0.0.1"),
            device("WEB", "100.0.0.2"),
            device("web", "100.0.0.3"),
        ];

        let merged = merge(&resources, &devices);
        assert_eq!(
            merged[0].tailscale_device.and_then(|d| d.primary_address()),
            Some("100.0.0.2")
        );
    }

    #[test]
    fn test_order_preserved_and_unmatched_left_empty() {
        let resources = vec![resource(102, "db"), resource(100, "web"), resource(101, "cache")];
        let devices = vec![device("laptop", "100.0.0.9")];

        let merged = merge(&resources, &devices);
        let ids: Vec<u32> = merged.iter().map(|m| m.resource.vmid).collect();
        assert_eq!(ids, vec![102, 100, 101]);
        assert!(merged.iter().all(|m| m.tailscale_device.is_none()));
    }

    #[test]
    fn test_serialized_shape() {
        let resources = vec![resource(100, "web"), resource(101, "db")];
        let devices = vec![device("web", "100.1.2.3")];

        let json = serde_json::to_value(merge(&resources, &devices)).unwrap();
        assert_eq!(json[0]["vmid"], 100);
        assert_eq!(json[0]["type"], "qemu");
        assert_eq!(json[0]["tailscaleDevice"]["addresses"][0], "100.1.2.3");
        assert!(json[1].get("tailscaleDevice").is_none());
    }
}
