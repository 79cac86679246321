use crate::{
    client::{ProxmoxClient, TailscaleClient},
    core::domain::{
        error::{DashboardError, DashboardResult},
        model::{
            merged_resource::{MergedResource, merge},
            resource::Resource,
            tailscale_device::TailscaleDevice,
        },
    },
};

/// Outcome of fetching one upstream inventory.
#[derive(Debug)]
pub enum SourceState<T> {
    /// Credentials are missing; no request was made.
    Unconfigured,
    Ready(T),
    Failed(DashboardError),
}

impl<T> SourceState<T> {
    fn from_result(configured: bool, result: DashboardResult<T>) -> Self {
        match result {
            _ if !configured => SourceState::Unconfigured,
            Ok(value) => SourceState::Ready(value),
            Err(e) => SourceState::Failed(e),
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, SourceState::Unconfigured)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            SourceState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DashboardError> {
        match self {
            SourceState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Both inventories, fetched together.
#[derive(Debug)]
pub struct Inventory {
    pub proxmox: SourceState<Vec<Resource>>,
    pub tailscale: SourceState<Vec<TailscaleDevice>>,
}

impl Inventory {
    /// Resources joined with devices. Without a Tailscale listing every
    /// resource is returned without a device.
    pub fn merged(&self) -> Vec<MergedResource<'_>> {
        let resources = self.proxmox.ready().map(Vec::as_slice).unwrap_or_default();
        let devices = self.tailscale.ready().map(Vec::as_slice).unwrap_or_default();
        merge(resources, devices)
    }
}

/// Fetches the Proxmox and Tailscale inventories concurrently.
#[derive(Debug, Default)]
pub struct InventoryService;

impl InventoryService {
    pub fn new() -> Self {
        Self
    }

    /// Unconfigured sides are skipped without a request.
    pub async fn execute(&self, proxmox: &ProxmoxClient, tailscale: &TailscaleClient) -> Inventory {
        let proxmox_configured = proxmox.is_configured();
        let tailscale_configured = tailscale.is_configured();

        let (resources, devices) = tokio::join!(
            async {
                if proxmox_configured {
                    proxmox.list_resources().await
                } else {
                    Ok(Vec::new())
                }
            },
            async {
                if tailscale_configured {
                    tailscale.list_devices().await
                } else {
                    Ok(Vec::new())
                }
            }
        );

        Inventory {
            proxmox: SourceState::from_result(proxmox_configured, resources),
            tailscale: SourceState::from_result(tailscale_configured, devices),
        }
    }
}
