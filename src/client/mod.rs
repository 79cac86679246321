//! Clients for the two upstream inventories.

mod proxmox;
mod tailscale;

pub use proxmox::ProxmoxClient;
pub use tailscale::{DEFAULT_TAILSCALE_API, TailscaleClient};
