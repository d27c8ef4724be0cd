//! Liveness endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{auth::UnmatchedRoutePolicy, constants::paths, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rate_limiting: bool,
    /// Whether routes missing from the gate's table are let through
    pub unmatched_routes_open: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.config();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        rate_limiting: config.rate_limit.enabled,
        unmatched_routes_open: config.auth.unmatched_routes == UnmatchedRoutePolicy::Allow,
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route(paths::HEALTH, get(health))
}
