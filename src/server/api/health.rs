// Health endpoint - liveness plus registry sizes

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub components: usize,
    pub styles: usize,
    pub scripts: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.registry();
    Json(HealthResponse {
        status: "ok",
        components: state.catalog.len(),
        styles: registry.style_count(),
        scripts: registry.script_count(),
    })
}
