//! Configuration Endpoints
//!
//! Secrets are returned in plain text; the dashboard has no user auth.

use super::{error::ApiError, state::AppState};
use crate::core::domain::{
    error::DashboardError,
    model::dashboard_config::{ConfigRecord, DashboardConfig},
};
use axum::{body::Bytes, extract::State, response::Json};

/// `GET /api/config`: the effective configuration (environment over file).
#[tracing::instrument(skip(state))]
pub async fn get_config(State(state): State<AppState>) -> Json<DashboardConfig> {
    Json(state.config.get().await)
}

/// `POST /api/config`: merge a partial record into the persisted one.
///
/// Any failure, including an unparseable body, is a 500.
#[tracing::instrument(skip(state, body))]
pub async fn save_config(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DashboardConfig>, ApiError> {
    let partial: ConfigRecord = serde_json::from_slice(&body)
        .map_err(|e| DashboardError::MalformedBody(format!("expected a JSON object: {e}")))?;
    let saved = state.config.save(partial).await?;
    Ok(Json(saved))
}
