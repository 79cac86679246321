//! Domain model for devices from the Tailscale `/tailnet/{tailnet}/devices` listing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tailnet device, kept verbatim apart from the two fields the merge reads.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TailscaleDevice {
    /// The machine's hostname as reported by the device.
    #[serde(default)]
    pub hostname: String,
    /// Tailnet IPs, IPv4 first.
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TailscaleDevice {
    /// Returns the first tailnet address, if any.
    pub fn primary_address(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }

    /// Case-insensitive hostname comparison used to pair devices with guests.
    /// An empty name never matches.
    pub fn matches_hostname(&self, name: &str) -> bool {
        !name.is_empty() && self.hostname.to_lowercase() == name.to_lowercase()
    }
}

/// Body of a successful device listing. `devices` may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceListResponse {
    #[serde(default)]
    pub devices: Vec<TailscaleDevice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_roundtrips_unknown_fields() {
        let raw = serde_json::json!({
            "hostname": "Web",
            "addresses": ["100.64.0.7", "fd7a:115c:a1e0::7"],
            "os": "linux",
            "lastSeen": "2026-10-01T10:00:00Z"
        });
        let device: TailscaleDevice = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(device.primary_address(), Some("100.64.0.7"));
        assert!(device.matches_hostname("web"));
        assert!(!device.matches_hostname("web2"));
        assert_eq!(serde_json::to_value(&device).unwrap(), raw);
    }

    #[test]
    fn test_missing_devices_is_empty() {
        let body: DeviceListResponse = serde_json::from_str("{}").unwrap();
        assert!(body.devices.is_empty());
    }
}
