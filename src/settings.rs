//! Process-level settings of the dashboard server, read from the environment.
//!
//! These are separate from the [`DashboardConfig`](crate::DashboardConfig)
//! record, which holds upstream credentials and can be edited at runtime.

use crate::{
    client::DEFAULT_TAILSCALE_API,
    core::domain::error::{DashboardResult, ValidationError},
    observability::LogFormat,
};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// `PROXSCALE_BIND`
    pub bind_addr: SocketAddr,
    /// `PROXSCALE_CONFIG_PATH`
    pub config_path: PathBuf,
    /// `PROXSCALE_TAILSCALE_API`
    pub tailscale_api: String,
    /// `LOG_FORMAT`
    pub log_format: LogFormat,
}

impl ServerSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings from an arbitrary lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get("PROXSCALE_BIND").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|e| ValidationError::Field {
            field: "PROXSCALE_BIND".to_string(),
            message: format!("'{bind}' is not a socket address: {e}"),
        })?;

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ValidationError::Field {
                    field: "LOG_FORMAT".to_string(),
                    message: format!("'{other}' is not one of: text, json"),
                }
                .into());
            }
        };

        Ok(Self {
            bind_addr,
            config_path: get("PROXSCALE_CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            tailscale_api: get("PROXSCALE_TAILSCALE_API")
                .unwrap_or_else(|| DEFAULT_TAILSCALE_API.to_string()),
            log_format,
        })
    }
}
