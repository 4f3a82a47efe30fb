/**
 * Store Configuration
 *
 * This module selects the document store the server persists to.
 *
 * # Selection
 *
 * - `DATABASE_URL` set and reachable: PostgreSQL, with migrations applied
 * - otherwise: the in-memory store
 *
 * Failing to reach the database is logged but does not prevent server
 * startup. Documents stored in memory are lost on restart.
 */

use std::sync::Arc;

use crate::backend::store::{MemoryDocumentStore, PgDocumentStore, SharedStore};
use crate::shared::ServerConfig;

/// Load the document store described by the configuration
///
/// # Example
///
/// ```rust,no_run
/// use docsync::backend::server::config::load_store;
/// use docsync::shared::ServerConfig;
///
/// # async fn example() {
/// let store = load_store(&ServerConfig::default()).await;
/// # }
/// ```
pub async fn load_store(config: &ServerConfig) -> SharedStore {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("[Startup] DATABASE_URL not set. Documents will be kept in memory only.");
        return Arc::new(MemoryDocumentStore::new());
    };

    tracing::info!("[Startup] Connecting to database...");

    match PgDocumentStore::connect(database_url).await {
        Ok(store) => {
            tracing::info!("[Startup] Using PostgreSQL document store");
            Arc::new(store)
        }
        Err(e) => {
            tracing::error!("[Startup] Failed to open PostgreSQL store: {}", e);
            tracing::warn!("[Startup] Falling back to in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
    }
}
