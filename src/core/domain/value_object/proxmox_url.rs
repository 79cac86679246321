use crate::core::domain::error::ValidationError;
use url::Url;

/// A validated Proxmox base URL (e.g. `https://pve.lan:8006`).
///
/// Stored without a trailing slash so API paths can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUrl(String);

impl ProxmoxUrl {
    /// Validates and normalizes a base URL.
    pub fn new(url: &str) -> Result<Self, ValidationError> {
        validate_url(url)?;
        Ok(Self(url.trim_end_matches('/').to_string()))
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the full API URL for a path below `/api2/json`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api2/json/{}", self.0, path.trim_start_matches('/'))
    }
}

/// Validates a base URL: non-empty, parseable, http or https, with a host.
fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::Field {
            field: "proxmoxUrl".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }
    let parsed =
        Url::parse(url).map_err(|e| ValidationError::Format(format!("Invalid URL format: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme '{}'. Must be one of: http, https",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(ValidationError::Format("URL has no host".to_string()));
    }
    Ok(())
}
