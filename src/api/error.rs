//! Mapping of [`DashboardError`] onto HTTP responses.

use crate::core::domain::error::{DashboardError, ValidationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// A handler error rendered as `{ "error": "..." }`.
#[derive(Debug)]
pub struct ApiError(pub DashboardError);

impl From<DashboardError> for ApiError {
    fn from(error: DashboardError) -> Self {
        ApiError(error)
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError(error.into())
    }
}

/// 400 for caller mistakes and missing configuration, 500 for everything else.
pub fn status_for(error: &DashboardError) -> StatusCode {
    if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// The text shown to the user. Validation messages are shown without the
/// taxonomy prefix.
pub fn public_message(error: &DashboardError) -> String {
    match error {
        DashboardError::Validation(ValidationError::Field { message, .. }) => message.clone(),
        DashboardError::Validation(ValidationError::Format(message))
        | DashboardError::Validation(ValidationError::ConstraintViolation(message)) => {
            message.clone()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        (status, Json(json!({ "error": public_message(&self.0) }))).into_response()
    }
}
