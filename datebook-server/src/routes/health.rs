//! Liveness endpoint

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
