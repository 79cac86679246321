//! Internal HTTP client for the Proxmox VE API using API-token authentication.

use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::proxmox_connection::ProxmoxConnection,
};
use reqwest::{Client, header::AUTHORIZATION};
use serde::Deserialize;

const SERVICE: &str = "proxmox";

/// Every Proxmox response wraps its payload in `{"data": ...}`.
#[derive(Deserialize)]
struct ProxmoxEnvelope<T> {
    data: T,
}

/// Internal HTTP client that signs each request with the connection's API token.
///
/// There is no session: every request carries the
/// `Authorization: PVEAPIToken=...` header. Requests are never retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    connection: ProxmoxConnection,
}

impl ApiClient {
    /// Creates a new `ApiClient` reusing an existing reqwest connection pool.
    pub fn new(http_client: Client, connection: ProxmoxConnection) -> Self {
        Self {
            http_client,
            connection,
        }
    }

    /// Performs an authenticated GET request and unwraps `data`.
    pub async fn get<T>(&self, path: &str) -> DashboardResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute_request(reqwest::Method::GET, path, None::<&()>)
            .await
    }

    /// Performs an authenticated POST request with an optional JSON body and unwraps `data`.
    pub async fn post<B, T>(&self, path: &str, body: Option<&B>) -> DashboardResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        self.execute_request(reqwest::Method::POST, path, body)
            .await
    }

    /// Core request execution: send, classify the failure, decode the envelope.
    async fn execute_request<B, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> DashboardResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = self.connection.proxmox_url().api_url(path);
        tracing::debug!(%method, %url, "proxmox request");

        let mut req_builder = self.http_client.request(method, &url).header(
            AUTHORIZATION,
            self.connection.proxmox_token().as_header_value(),
        );

        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
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

        serde_json::from_str::<ProxmoxEnvelope<T>>(&text)
            .map(|envelope| envelope.data)
            .map_err(|e| DashboardError::Decode {
                service: SERVICE,
                message: e.to_string(),
            })
    }
}

/// Describes a send failure, walking the source chain so TLS trust problems
/// (self-signed certificates) are visible in the message.
pub(crate) fn transport_message(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
