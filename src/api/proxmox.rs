//! Proxmox Endpoints
//!
//! Inventory listing, power actions and the Tailscale install action.

use super::{
    error::{ApiError, public_message},
    state::AppState,
};
use crate::{
    application::{
        request::{ControlRequest, InstallRequest},
        service::provision_service::{ProvisionReceipt, ProvisionService},
    },
    core::domain::{error::ValidationError, model::resource::Resource},
};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

pub(crate) const NOT_CONFIGURED: &str = "Not Configured";

/// Body of `GET /api/proxmox/nodes`.
#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
}

/// Body of a successful power action.
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub result: Value,
}

/// Body of a successful install submission.
#[derive(Debug, Serialize)]
pub struct InstallResponse {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: ProvisionReceipt,
}

/// Action bodies are parsed by hand: the dashboard posts JSON without a
/// content type, which axum's `Json` extractor would refuse.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ValidationError> {
    serde_json::from_slice(body)
        .map_err(|e| ValidationError::Format(format!("Missing parameters: {e}")))
}

/// `GET /api/proxmox/nodes`: every container and VM of the cluster.
#[tracing::instrument(skip(state))]
pub async fn list_resources(State(state): State<AppState>) -> Response {
    let config = state.config.get().await;
    let client = state.proxmox_client(&config);

    if !client.is_configured() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ResourcesResponse {
                configured: false,
                error: Some(NOT_CONFIGURED.to_string()),
                resources: Some(Vec::new()),
            }),
        )
            .into_response();
    }

    match client.list_resources().await {
        Ok(resources) => Json(ResourcesResponse {
            configured: true,
            error: None,
            resources: Some(resources),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "proxmox inventory failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResourcesResponse {
                    configured: true,
                    error: Some(public_message(&e)),
                    resources: None,
                }),
            )
                .into_response()
        }
    }
}

/// `POST /api/proxmox/control`: start, stop, shutdown or reboot a guest.
///
/// Repeated calls are forwarded as-is; nothing is de-duplicated.
#[tracing::instrument(skip(state, body))]
pub async fn control(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ControlResponse>, ApiError> {
    let command = parse_body::<ControlRequest>(&body)?.validate()?;

    let config = state.config.get().await;
    let result = state
        .proxmox_client(&config)
        .set_power_state(&command.node, command.kind, command.vmid, command.action)
        .await?;

    Ok(Json(ControlResponse { result }))
}

/// `POST /api/proxmox/install`: install Tailscale on a qemu VM via its guest agent.
#[tracing::instrument(skip(state, body))]
pub async fn install(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InstallResponse>, ApiError> {
    let target = parse_body::<InstallRequest>(&body)?.validate()?;

    let config = state.config.get().await;
    let client = state.proxmox_client(&config);
    let receipt = ProvisionService::new()
        .execute(&client, &config, &target)
        .await?;

    Ok(Json(InstallResponse {
        success: true,
        receipt,
    }))
}
