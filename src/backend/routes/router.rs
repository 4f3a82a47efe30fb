/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all routes into a single Axum router.
 *
 * # Routes
 *
 * - `GET /ws` - sync WebSocket (`docId` required, `clientId` optional)
 * - `GET /documents` - documents changed after `?after=<version>`
 * - `GET /health` - liveness
 *
 * Anything else falls through to a plain 404.
 */

use axum::{http::StatusCode, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::collab::{handle_health, handle_list_documents, handle_ws_upgrade};
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/ws", get(handle_ws_upgrade))
        .route("/documents", get(handle_list_documents))
        .route("/health", get(handle_health))
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
