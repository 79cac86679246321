//! Domain model for node list items from the `/nodes` endpoint.

use serde::{Deserialize, Serialize};

/// A node in the Proxmox cluster.
///
/// Only the name is needed to walk the cluster; the rest is kept for logging.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeListItem {
    /// The node name (e.g., "pve1").
    pub node: String,
    /// Current node status (e.g., "online", "offline", "unknown").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// System uptime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
}
