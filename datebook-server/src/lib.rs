//! HTTP API for datebook.
//!
//! - `POST /api/events` creates an event
//! - `GET /api/events?start=&end=` lists events in an inclusive date range
//! - `GET /api/health` reports liveness

pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::events::router())
        .merge(routes::health::router())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
