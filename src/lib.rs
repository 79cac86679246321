//! A small self-hosted dashboard backend for a Proxmox VE cluster and a
//! Tailscale tailnet.
//!
//! The crate provides:
//! - Clients for the Proxmox VE API (API-token auth) and the Tailscale v2 API
//! - A merge of guests with tailnet devices by case-insensitive hostname
//! - Power actions and a fire-and-forget Tailscale install through the QEMU
//!   guest agent
//! - A JSON-file configuration store overlaid by environment variables
//! - An axum router exposing all of the above as a JSON API
//!
//! # Examples
//!
//! ```no_run
//! use proxscale::{ConfigRepository, JsonConfigStore, ProxmoxClient, TailscaleClient, merge};
//!
//! #[tokio::main]
//! async fn main() -> proxscale::DashboardResult<()> {
//!     let config = JsonConfigStore::new("data/config.json").get().await;
//!     let proxmox = ProxmoxClient::from_config(&config)?;
//!     let tailscale = TailscaleClient::from_config(&config, reqwest::Client::new());
//!
//!     let (resources, devices) = tokio::join!(proxmox.list_resources(), tailscale.list_devices());
//!     let (resources, devices) = (resources?, devices?);
//!     for entry in merge(&resources, &devices) {
//!         let ip = entry.tailscale_device.and_then(|d| d.primary_address());
//!         println!("{} {} {:?}", entry.resource.vmid, entry.resource.name, ip);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
mod application;
mod client;
mod core;
pub mod observability;
pub mod settings;

pub use crate::{
    application::{
        request::{ControlCommand, ControlRequest, InstallRequest, InstallTarget},
        service::{
            inventory_service::{Inventory, InventoryService, SourceState},
            provision_service::{ProvisionReceipt, ProvisionService},
        },
    },
    client::{DEFAULT_TAILSCALE_API, ProxmoxClient, TailscaleClient},
    core::{
        domain::{
            error::{DashboardError, DashboardResult, ValidationError},
            model::{
                dashboard_config::{ConfigRecord, DashboardConfig, EnvOverlay, resolve},
                merged_resource::{MergedResource, merge},
                node_list_item::NodeListItem,
                proxmox_connection::{ProxmoxConnection, ProxmoxSettings},
                resource::{PowerAction, Resource, ResourceKind},
                tailscale_device::TailscaleDevice,
            },
            value_object::{ProxmoxApiToken, ProxmoxUrl},
        },
        infrastructure::config_store::{ConfigRepository, JsonConfigStore},
    },
};

#[cfg(test)]
mod tests;
