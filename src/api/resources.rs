//! Merged Inventory Endpoint
//!
//! Fetches both inventories concurrently and returns guests with their
//! tailnet device attached. A Tailscale failure degrades to "no devices".

use super::{error::public_message, state::AppState};
use crate::{
    application::service::inventory_service::{InventoryService, SourceState},
    core::domain::model::merged_resource::MergedResource,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SourceStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> From<&SourceState<T>> for SourceStatus {
    fn from(state: &SourceState<T>) -> Self {
        Self {
            configured: state.is_configured(),
            error: state.error().map(public_message),
        }
    }
}

/// Body of `GET /api/resources`.
#[derive(Debug, Serialize)]
pub struct MergedResourcesResponse<'a> {
    pub proxmox: SourceStatus,
    pub tailscale: SourceStatus,
    pub resources: Vec<MergedResource<'a>>,
}

/// `GET /api/resources`
#[tracing::instrument(skip(state))]
pub async fn list_merged(State(state): State<AppState>) -> Response {
    let config = state.config.get().await;
    let proxmox = state.proxmox_client(&config);
    let tailscale = state.tailscale_client(&config);

    let inventory = InventoryService::new().execute(&proxmox, &tailscale).await;
    if let Some(e) = inventory.tailscale.error() {
        tracing::warn!(error = %e, "tailscale unavailable, serving resources without devices");
    }

    let status = match &inventory.proxmox {
        SourceState::Unconfigured => StatusCode::BAD_REQUEST,
        SourceState::Failed(e) => {
            tracing::error!(error = %e, "proxmox inventory failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        SourceState::Ready(_) => StatusCode::OK,
    };

    let body = MergedResourcesResponse {
        proxmox: SourceStatus::from(&inventory.proxmox),
        tailscale: SourceStatus::from(&inventory.tailscale),
        resources: inventory.merged(),
    };
    (status, Json(body)).into_response()
}
