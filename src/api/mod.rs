//! HTTP API Module
//!
//! JSON endpoints consumed by the dashboard UI.
//!
//! This module contains:
//! - `state`: Shared application state
//! - `config`: Read and save the configuration record
//! - `proxmox`: Inventory, power actions, Tailscale install
//! - `tailscale`: Tailnet device listing
//! - `resources`: Both inventories merged by hostname

mod config;
mod error;
mod health;
mod proxmox;
mod resources;
mod state;
mod tailscale;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Settings
        .route("/api/config", get(config::get_config).post(config::save_config))
        // Inventories
        .route("/api/proxmox/nodes", get(proxmox::list_resources))
        .route("/api/tailscale", get(tailscale::list_devices))
        .route("/api/resources", get(resources::list_merged))
        // Actions
        .route("/api/proxmox/control", post(proxmox::control))
        .route("/api/proxmox/install", post(proxmox::install))
        .with_state(state)
}
