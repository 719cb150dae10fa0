//! Router setup and server lifecycle

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;

use crate::config::Config;

use super::api;
use super::state::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let resource_route = format!("{}/:file", state.resource_base());

    Router::new()
        .route("/health", get(api::health))
        .route("/taghelper/:tag", get(api::render_fragment))
        .route(&resource_route, get(api::get_resource))
        .with_state(state)
}

/// Start the fragment server
pub async fn start_server(
    config: Config,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let bind_addr = config.bind_addr;
    let state = AppState::from_config(&config);

    tracing::info!(
        "Serving {} component(s) from {} ({} mode)",
        state.catalog.len(),
        config.components_dir.display(),
        if config.link_mode { "link" } else { "inline" }
    );

    let app = build_router(state);

    // Bind and serve
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}
