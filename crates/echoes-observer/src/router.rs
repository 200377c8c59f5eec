//! Axum router construction for the observer.
//!
//! Assembles all routes (pages, JSON API, `WebSocket`) into a single
//! [`Router`] with CORS and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- landing page
/// - `GET /results` -- date form and report page
/// - `GET /ws/carousel` -- per-connection carousel frames
/// - `GET /api/phases`, `/api/phase`, `/api/weather`, `/api/report`,
///   `/api/current` -- JSON API
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/results", get(handlers::results))
        // WebSocket
        .route("/ws/carousel", get(ws::ws_carousel))
        // JSON API
        .route("/api/phases", get(handlers::list_phases))
        .route("/api/phase", get(handlers::get_phase))
        .route("/api/weather", get(handlers::get_weather))
        .route("/api/report", get(handlers::get_report))
        .route("/api/current", get(handlers::get_current))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
