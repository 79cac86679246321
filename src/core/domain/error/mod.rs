use thiserror::Error;

/// The main error type for dashboard operations.
///
/// The variants separate "not configured" from "configured but failing" so
/// the HTTP layer can tell a user to visit settings instead of reporting an
/// upstream outage.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Required credentials are absent. Raised before any network I/O.
    ///
    /// # Fields
    /// * `0` - Which upstream is missing credentials
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream could not be reached (DNS, connect, TLS, timeout).
    ///
    /// # Fields
    /// * `service` - The upstream being called ("proxmox", "tailscale")
    /// * `message` - The transport failure reported by the HTTP client
    #[error("{service} transport error: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    /// The upstream answered with a non-success status.
    ///
    /// # Fields
    /// * `service` - The upstream being called
    /// * `status` - The HTTP status code
    /// * `body` - The response body text
    #[error("{service} API error {status}: {body}")]
    UpstreamApi {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The upstream answered with a success status but an unreadable body.
    #[error("{service} response could not be decoded: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    /// Represents validation failures of request parameters or settings
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The persisted configuration could not be written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A request body could not be read as the expected JSON shape.
    ///
    /// Unlike [`ValidationError`] this is not a client error: the settings
    /// endpoint reports an unreadable body as a failed save.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// A background task panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Returns true if the error was raised because of caller input or
    /// missing configuration rather than an upstream or storage failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Configuration(_) | DashboardError::Validation(_)
        )
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    pub(crate) fn missing(field: &str) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            message: format!("Missing parameter '{field}'"),
        }
    }
}

/// Type alias for Results that may fail with a DashboardError
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_carries_status_and_body() {
        let err = DashboardError::UpstreamApi {
            service: "proxmox",
            status: 401,
            body: "authentication failure".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "proxmox API error 401: authentication failure"
        );
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(DashboardError::Configuration("proxmox".into()).is_client_error());
        assert!(DashboardError::from(ValidationError::missing("node")).is_client_error());
        assert!(!DashboardError::Storage("disk full".into()).is_client_error());
        assert!(!DashboardError::MalformedBody("expected object".into()).is_client_error());
        assert!(!DashboardError::Internal("task panicked".into()).is_client_error());
    }
}
