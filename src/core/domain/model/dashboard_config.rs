//! The dashboard configuration record and its environment overlay.
//!
//! Resolution is a pure function of two explicit inputs: an [`EnvOverlay`]
//! snapshot and the record persisted on disk. Environment values win.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credentials and identifiers for both upstreams. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxmox_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxmox_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxmox_token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxmox_token_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailscale_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailscale_tailnet: Option<String>,
    /// Reusable auth key used when enrolling a VM into the tailnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailscale_auth_key: Option<String>,
}

/// The persisted file as an open JSON object. Keys outside [`DashboardConfig`]
/// are carried through saves untouched.
pub type ConfigRecord = Map<String, Value>;

impl DashboardConfig {
    /// Reads the known fields out of a record. `null` reads as absent and
    /// unknown keys are ignored.
    pub fn from_record(record: &ConfigRecord) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(record.clone()))
    }
}

/// Snapshot of the environment variables that overlay the persisted record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    pub proxmox_url: Option<String>,
    pub proxmox_user: Option<String>,
    pub proxmox_token_id: Option<String>,
    pub proxmox_token_secret: Option<String>,
    pub tailscale_api_key: Option<String>,
    pub tailscale_tailnet: Option<String>,
}

impl EnvOverlay {
    pub const PROXMOX_URL: &'static str = "PROXMOX_URL";
    pub const PROXMOX_USER: &'static str = "PROXMOX_USER";
    pub const PROXMOX_TOKEN_ID: &'static str = "PROXMOX_TOKEN_ID";
    pub const PROXMOX_TOKEN_SECRET: &'static str = "PROXMOX_TOKEN_SECRET";
    pub const TAILSCALE_API_KEY: &'static str = "TAILSCALE_API_KEY";
    pub const TAILSCALE_TAILNET: &'static str = "TAILSCALE_TAILNET";

    /// Reads the overlay from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the overlay from an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            proxmox_url: get(Self::PROXMOX_URL),
            proxmox_user: get(Self::PROXMOX_USER),
            proxmox_token_id: get(Self::PROXMOX_TOKEN_ID),
            proxmox_token_secret: get(Self::PROXMOX_TOKEN_SECRET),
            tailscale_api_key: get(Self::TAILSCALE_API_KEY),
            tailscale_tailnet: get(Self::TAILSCALE_TAILNET),
        }
    }

    /// The overlay on its own, used when no persisted record is readable.
    pub fn into_config(self) -> DashboardConfig {
        resolve(self, DashboardConfig::default())
    }
}

/// Resolves the effective configuration: environment first, then the persisted record.
pub fn resolve(env: EnvOverlay, persisted: DashboardConfig) -> DashboardConfig {
    DashboardConfig {
        proxmox_url: env.proxmox_url.or(persisted.proxmox_url),
        proxmox_user: env.proxmox_user.or(persisted.proxmox_user),
        proxmox_token_id: env.proxmox_token_id.or(persisted.proxmox_token_id),
        proxmox_token_secret: env.proxmox_token_secret.or(persisted.proxmox_token_secret),
        tailscale_api_key: env.tailscale_api_key.or(persisted.tailscale_api_key),
        tailscale_tailnet: env.tailscale_tailnet.or(persisted.tailscale_tailnet),
        tailscale_auth_key: persisted.tailscale_auth_key,
    }
}
