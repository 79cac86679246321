//! Application State
//!
//! Shared state passed to all API handlers.

use crate::{
    client::{ProxmoxClient, TailscaleClient},
    core::{
        domain::{
            error::{DashboardError, DashboardResult},
            model::{dashboard_config::DashboardConfig, proxmox_connection::ProxmoxSettings},
        },
        infrastructure::config_store::ConfigRepository,
    },
};
use std::sync::Arc;

/// Shared application state
///
/// Clients are rebuilt from a fresh configuration on every request; only the
/// reqwest connection pool is shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<dyn ConfigRepository>,
    pub http_client: reqwest::Client,
    pub tailscale_api: String,
}

impl AppState {
    pub fn new(
        config: Arc<dyn ConfigRepository>,
        tailscale_api: impl Into<String>,
    ) -> DashboardResult<Self> {
        let http_client =
            reqwest::Client::builder()
                .build()
                .map_err(|e| DashboardError::Transport {
                    service: "http",
                    message: e.to_string(),
                })?;
        Ok(Self {
            config,
            http_client,
            tailscale_api: tailscale_api.into(),
        })
    }

    pub fn proxmox_client(&self, config: &DashboardConfig) -> ProxmoxClient {
        ProxmoxClient::with_http_client(
            ProxmoxSettings::from_config(config),
            self.http_client.clone(),
        )
    }

    pub fn tailscale_client(&self, config: &DashboardConfig) -> TailscaleClient {
        TailscaleClient::from_config(config, self.http_client.clone())
            .with_base_url(self.tailscale_api.clone())
    }
}
