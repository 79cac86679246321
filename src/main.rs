//! proxscale server: serves the dashboard JSON API.

use anyhow::Context;
use proxscale::{JsonConfigStore, api, observability, settings::ServerSettings};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may be set by the service manager.
    dotenvy::dotenv().ok();

    let settings = ServerSettings::from_env().context("invalid server settings")?;
    observability::init_tracing(settings.log_format);

    info!(
        bind = %settings.bind_addr,
        config = %settings.config_path.display(),
        "starting proxscale"
    );

    let store = JsonConfigStore::new(&settings.config_path);
    let state = api::AppState::new(Arc::new(store), settings.tailscale_api.clone())
        .context("failed to build HTTP client")?;

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, api::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
