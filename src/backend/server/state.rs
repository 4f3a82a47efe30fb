/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container of the server:
 * - Resolved server configuration
 * - Document store (PostgreSQL or in-memory)
 * - Connection hub shared by every session
 * - Sync protocol handler wired to the store and the hub
 *
 * Every field is cheap to clone (`Arc` or a handle around one), so each
 * request receives its own copy of the state.
 *
 * # Example
 *
 * ```rust,no_run
 * use docsync::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let port = state.config.port;
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::collab::SyncProtocolHandler;
use crate::backend::realtime::Hub;
use crate::backend::store::SharedStore;
use crate::shared::ServerConfig;

/// Main application state
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<ServerConfig>,
    /// Document persistence
    pub store: SharedStore,
    /// Registry of live sessions per document
    pub hub: Hub,
    /// Protocol handler shared by all sessions
    pub sync_handler: SyncProtocolHandler,
}

impl AppState {
    /// Build the state around a configuration and a store
    ///
    /// The protocol handler is created from the same store and hub
    /// held by the state.
    pub fn new(config: ServerConfig, store: SharedStore) -> Self {
        let hub = Hub::new();
        let sync_handler = SyncProtocolHandler::new(store.clone(), hub.clone());
        Self {
            config: Arc::new(config),
            store,
            hub,
            sync_handler,
        }
    }
}

/// Implement FromRef for the document store
///
/// This allows Axum handlers to extract `SharedStore` directly
/// from `AppState` using `State(SharedStore)`.
impl FromRef<AppState> for SharedStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

/// Implement FromRef for the connection hub
impl FromRef<AppState> for Hub {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hub.clone()
    }
}

/// Implement FromRef for the sync protocol handler
impl FromRef<AppState> for SyncProtocolHandler {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sync_handler.clone()
    }
}
