/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the document store (PostgreSQL or in-memory)
 * 2. Create the hub and the sync protocol handler
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::backend::store::SharedStore;
use crate::shared::ServerConfig;

/// Create the application router, selecting the store from the configuration
///
/// # Example
///
/// ```rust,no_run
/// use docsync::backend::server::init::create_app;
/// use docsync::shared::ServerConfig;
///
/// # async fn example() {
/// let app = create_app(ServerConfig::default()).await;
/// # }
/// ```
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("[Startup] Initializing docsync server");

    let store = load_store(&config).await;
    create_app_with_store(config, store)
}

/// Create the application router around an existing store
pub fn create_app_with_store(config: ServerConfig, store: SharedStore) -> Router<()> {
    let app_state = AppState::new(config, store);

    tracing::info!(
        "[Startup] Sessions use {}-frame outbound queues and a {:?} write timeout",
        app_state.config.outbound_queue_capacity,
        app_state.config.write_timeout
    );

    create_router(app_state)
}
