//! Document Store Module
//!
//! Durable storage for documents behind a narrow async contract:
//!
//! - `get` - fetch one document; absence is `Ok(None)`, not an error
//! - `save` - version-gated upsert; a write whose version is not strictly
//!   greater than the stored one is a successful no-op
//! - `list_after` - every document whose version is greater than a bound
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - DocumentStore trait and StoreError
//! ├── postgres.rs - PostgreSQL implementation (sqlx)
//! └── memory.rs   - In-process implementation
//! ```
//!
//! The server uses PostgreSQL when `DATABASE_URL` is configured and falls back
//! to the in-memory store otherwise.

use std::sync::Arc;
use async_trait::async_trait;
use thiserror::Error;

use crate::shared::Document;

/// PostgreSQL-backed store
pub mod postgres;

/// In-memory store
pub mod memory;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Errors returned by document stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query or connection failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Version-gated document storage
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by id
    async fn get(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Upsert a document if its version is newer than the stored one
    ///
    /// Returns `true` when the write took effect and `false` when it was
    /// ignored as stale.
    async fn save(&self, doc: &Document) -> Result<bool, StoreError>;

    /// All documents with `version > after`, ordered by version then id
    async fn list_after(&self, after: i64) -> Result<Vec<Document>, StoreError>;
}

/// Store handle shared between sessions and handlers
pub type SharedStore = Arc<dyn DocumentStore>;
