//! Tailscale Endpoint

use super::{error::public_message, proxmox::NOT_CONFIGURED, state::AppState};
use crate::core::domain::model::tailscale_device::TailscaleDevice;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Body of `GET /api/tailscale`.
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<TailscaleDevice>>,
}

/// `GET /api/tailscale`: the raw tailnet device listing.
#[tracing::instrument(skip(state))]
pub async fn list_devices(State(state): State<AppState>) -> Response {
    let config = state.config.get().await;
    let client = state.tailscale_client(&config);

    if !client.is_configured() {
        return (
            StatusCode::BAD_REQUEST,
            Json(DevicesResponse {
                configured: false,
                error: Some(NOT_CONFIGURED.to_string()),
                devices: Some(Vec::new()),
            }),
        )
            .into_response();
    }

    match client.list_devices().await {
        Ok(devices) => Json(DevicesResponse {
            configured: true,
            error: None,
            devices: Some(devices),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "tailscale device listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DevicesResponse {
                    configured: true,
                    error: Some(public_message(&e)),
                    devices: None,
                }),
            )
                .into_response()
        }
    }
}
