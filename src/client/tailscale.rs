use crate::core::{
    domain::{
        error::{DashboardError, DashboardResult},
        model::{
            dashboard_config::DashboardConfig,
            tailscale_device::{DeviceListResponse, TailscaleDevice},
        },
    },
    infrastructure::api_client::transport_message,
};
use reqwest::Client;

const SERVICE: &str = "tailscale";

/// Public Tailscale control-plane API.
pub const DEFAULT_TAILSCALE_API: &str = "https://api.tailscale.com";

/// A client for the Tailscale v2 device listing.
#[derive(Debug, Clone)]
pub struct TailscaleClient {
    api_key: Option<String>,
    tailnet: Option<String>,
    base_url: String,
    http_client: Client,
}

impl TailscaleClient {
    /// Creates a client from the Tailscale fields of a configuration record.
    pub fn from_config(config: &DashboardConfig, http_client: Client) -> Self {
        Self {
            api_key: config.tailscale_api_key.clone(),
            tailnet: config.tailscale_tailnet.clone(),
            base_url: DEFAULT_TAILSCALE_API.to_string(),
            http_client,
        }
    }

    /// Points the client at another API host (a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns true if both API key and tailnet are present.
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.tailnet.as_deref()) {
            (Some(key), Some(tailnet)) if !key.is_empty() && !tailnet.is_empty() => {
                Some((key, tailnet))
            }
            _ => None,
        }
    }

    /// Lists every device of the tailnet.
    ///
    /// # Errors
    /// `Configuration` before any I/O if unconfigured, `Transport` if the API
    /// is unreachable, `UpstreamApi` for non-2xx answers (401 bad key, 404
    /// unknown tailnet), `Decode` for an unreadable body.
    pub async fn list_devices(&self) -> DashboardResult<Vec<TailscaleDevice>> {
        let (api_key, tailnet) = self.credentials().ok_or_else(|| {
            DashboardError::Configuration("Tailscale credentials not configured".to_string())
        })?;

        let url = format!(
            "{}/api/v2/tailnet/{}/devices",
            self.base_url.trim_end_matches('/'),
            tailnet
        );
        tracing::debug!(%url, "tailscale request");

        let response = self
            .http_client
            .get(&url)
            .basic_auth(api_key, Some(""))
            .send()
            .await
            .map_err(|e| DashboardError::Transport {
                service: SERVICE,
                message: transport_message(&e),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DashboardError::Transport {
                service: SERVICE,
                message: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            return Err(DashboardError::UpstreamApi {
                service: SERVICE,
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str::<DeviceListResponse>(&text)
            .map(|body| body.devices)
            .map_err(|e| DashboardError::Decode {
                service: SERVICE,
                message: e.to_string(),
            })
    }
}
