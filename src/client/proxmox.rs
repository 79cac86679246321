use crate::core::{
    domain::{
        error::{DashboardError, DashboardResult, ValidationError},
        model::{
            dashboard_config::DashboardConfig,
            node_list_item::NodeListItem,
            proxmox_connection::ProxmoxSettings,
            resource::{GuestListItem, PowerAction, Resource, ResourceKind},
        },
    },
    infrastructure::api_client::ApiClient,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;

/// Body of `POST /nodes/{node}/qemu/{vmid}/agent/exec`.
#[derive(Debug, Serialize)]
struct AgentExecRequest<'a> {
    command: [&'a str; 3],
}

/// A client for the parts of the Proxmox VE API the dashboard uses.
///
/// The client can be built from an incomplete configuration; every call then
/// fails with [`DashboardError::Configuration`] before touching the network.
///
/// # Examples
///
/// ```no_run
/// use proxscale::{DashboardConfig, DashboardResult, ProxmoxClient};
///
/// #[tokio::main]
/// async fn main() -> DashboardResult<()> {
///     let config = DashboardConfig {
///         proxmox_url: Some("https://pve.lan:8006".into()),
///         proxmox_user: Some("root@pam".into()),
///         proxmox_token_id: Some("dashboard".into()),
///         proxmox_token_secret: Some("xxxxxxxx-xxxx".into()),
///         ..Default::default()
///     };
///     let client = ProxmoxClient::from_config(&config)?;
///     for resource in client.list_resources().await? {
///         println!("{} {} {}", resource.vmid, resource.name, resource.status);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProxmoxClient {
    settings: ProxmoxSettings,
    http_client: Client,
}

impl ProxmoxClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    /// Returns `DashboardError::Transport` if the HTTP client cannot be built.
    pub fn new(settings: ProxmoxSettings) -> DashboardResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| DashboardError::Transport {
                service: "proxmox",
                message: e.to_string(),
            })?;
        Ok(Self::with_http_client(settings, http_client))
    }

    /// Creates a client that shares an existing reqwest pool.
    pub fn with_http_client(settings: ProxmoxSettings, http_client: Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    /// Creates a client from the Proxmox fields of a configuration record.
    pub fn from_config(config: &DashboardConfig) -> DashboardResult<Self> {
        Self::new(ProxmoxSettings::from_config(config))
    }

    /// Returns true if URL, user and token id are all present.
    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    fn api(&self) -> DashboardResult<ApiClient> {
        Ok(ApiClient::new(
            self.http_client.clone(),
            self.settings.connection()?,
        ))
    }

    /// Lists the cluster nodes (`GET /nodes`).
    pub async fn nodes(&self) -> DashboardResult<Vec<NodeListItem>> {
        self.api()?.get("nodes").await
    }

    /// Lists the containers or VMs of one node, tagged with kind and node.
    pub async fn guests(&self, node: &str, kind: ResourceKind) -> DashboardResult<Vec<Resource>> {
        list_guests(&self.api()?, node, kind).await
    }

    /// Lists every container and VM of every node as one flat list.
    ///
    /// Nodes are queried concurrently, and each node's container and VM
    /// listings are fetched in parallel. A failing listing for a node is
    /// logged and counted as empty so one bad node does not blank the whole
    /// inventory. Output follows node order, containers before VMs.
    ///
    /// # Errors
    /// Fails if the client is unconfigured, the node list cannot be fetched,
    /// or a per-node task panics.
    pub async fn list_resources(&self) -> DashboardResult<Vec<Resource>> {
        let api = self.api()?;
        let nodes: Vec<NodeListItem> = api.get("nodes").await?;

        let handles: Vec<_> = nodes
            .into_iter()
            .map(|node| {
                let api = api.clone();
                tokio::spawn(async move { node_resources(&api, &node.node).await })
            })
            .collect();

        collect_nodes(handles).await
    }

    /// Issues a power-state transition and returns the raw `data` (a task UPID).
    pub async fn set_power_state(
        &self,
        node: &str,
        kind: ResourceKind,
        vmid: u32,
        action: PowerAction,
    ) -> DashboardResult<Value> {
        let api = self.api()?;
        tracing::info!(%node, %kind, vmid, %action, "power action");
        api.post(
            &format!("nodes/{node}/{kind}/{vmid}/status/{action}"),
            None::<&()>,
        )
        .await
    }

    /// Submits `command` to the QEMU guest agent as `/bin/sh -c <command>`.
    ///
    /// Returns as soon as the agent accepts the request (the raw `data`,
    /// usually `{"pid": N}`); completion is not tracked.
    ///
    /// # Errors
    /// `Validation` for containers, which have no guest agent. The check runs
    /// before the configuration check and before any network I/O.
    pub async fn exec_guest_command(
        &self,
        node: &str,
        kind: ResourceKind,
        vmid: u32,
        command: &str,
    ) -> DashboardResult<Value> {
        if !kind.supports_guest_agent() {
            return Err(ValidationError::ConstraintViolation(format!(
                "Guest agent commands are only supported on qemu VMs, not {kind}"
            ))
            .into());
        }
        let api = self.api()?;
        tracing::info!(%node, vmid, "submitting guest agent command");
        let body = AgentExecRequest {
            command: ["/bin/sh", "-c", command],
        };
        api.post(&format!("nodes/{node}/qemu/{vmid}/agent/exec"), Some(&body))
            .await
    }
}

async fn list_guests(
    api: &ApiClient,
    node: &str,
    kind: ResourceKind,
) -> DashboardResult<Vec<Resource>> {
    let items: Vec<GuestListItem> = api.get(&format!("nodes/{node}/{kind}")).await?;
    Ok(items
        .into_iter()
        .map(|item| Resource::from_listing(item, kind, node))
        .collect())
}

/// Awaits the per-node tasks in node order.
async fn collect_nodes(handles: Vec<JoinHandle<Vec<Resource>>>) -> DashboardResult<Vec<Resource>> {
    let mut resources = Vec::new();
    for handle in handles {
        let node_resources = handle
            .await
            .map_err(|e| DashboardError::Internal(format!("node listing task failed: {e}")))?;
        resources.extend(node_resources);
    }
    Ok(resources)
}

async fn node_resources(api: &ApiClient, node: &str) -> Vec<Resource> {
    let (lxc, qemu) = tokio::join!(
        list_guests(api, node, ResourceKind::Lxc),
        list_guests(api, node, ResourceKind::Qemu)
    );
    let mut resources = or_empty(lxc, node, ResourceKind::Lxc);
    resources.extend(or_empty(qemu, node, ResourceKind::Qemu));
    resources
}

fn or_empty(
    listing: DashboardResult<Vec<Resource>>,
    node: &str,
    kind: ResourceKind,
) -> Vec<Resource> {
    listing.unwrap_or_else(|e| {
        tracing::warn!(%node, %kind, error = %e, "listing failed, treating as empty");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_nodes_keeps_node_order() {
        let handles = vec![
            tokio::spawn(async { vec![test_resource(100, "pve1")] }),
            tokio::spawn(async { Vec::new() }),
            tokio::spawn(async { vec![test_resource(300, "pve3")] }),
        ];
        let resources = collect_nodes(handles).await.unwrap();
        let vmids: Vec<u32> = resources.iter().map(|r| r.vmid).collect();
        assert_eq!(vmids, vec![100, 300]);
    }

    #[tokio::test]
    async fn test_panicked_node_task_fails_listing() {
        let failing: JoinHandle<Vec<Resource>> = tokio::spawn(async { panic!("node task blew up") });
        let handles = vec![
            tokio::spawn(async { vec![test_resource(100, "pve1")] }),
            failing,
        ];
        let result = collect_nodes(handles).await;
        assert!(matches!(result, Err(DashboardError::Internal(_))));
    }

    fn test_resource(vmid: u32, node: &str) -> Resource {
        Resource {
            vmid,
            name: format!("guest-{vmid}"),
            status: "running".to_string(),
            kind: ResourceKind::Qemu,
            node: node.to_string(),
            extra: serde_json::Map::new(),
        }
    }
}
