//! Serde helpers for lenient upstream payloads.

use serde::{Deserialize, Deserializer};

/// Deserializes a VM/container id that may arrive as a number or a numeric string.
///
/// The container listing of some Proxmox releases reports `vmid` as a string.
pub mod vmid {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawVmid {
        Number(u32),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawVmid::deserialize(deserializer)? {
            RawVmid::Number(n) => Ok(n),
            RawVmid::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid vmid '{s}'"))),
        }
    }
}
