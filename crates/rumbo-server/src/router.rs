//! Axum router construction.
//!
//! Assembles the REST routes and the WebSocket endpoint into a single
//! [`Router`] with CORS and request tracing enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete router.
///
/// CORS allows any origin for development use; this service carries no
/// credentials.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/ws", get(ws::ws_handler))
        .route("/api/users", post(handlers::create_user))
        .route("/api/reports", post(handlers::create_report).get(handlers::list_reports))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/traffic", get(handlers::get_traffic))
        .route("/api/routes", post(handlers::create_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
