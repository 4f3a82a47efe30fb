//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Route Types
//!
//! ## Sync
//!
//! - `GET /ws?docId=<id>&clientId=<id>` - WebSocket sync session
//!
//! ## Catch-up
//!
//! - `GET /documents?after=<version>` - JSON list of documents whose version
//!   is greater than `after`, ordered by version
//!
//! ## Operations
//!
//! - `GET /health` - returns `OK`
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docsync::backend::routes::create_router;
//! use docsync::backend::server::state::AppState;
//! use docsync::backend::store::MemoryDocumentStore;
//! use docsync::shared::ServerConfig;
//!
//! let app_state = AppState::new(ServerConfig::default(), Arc::new(MemoryDocumentStore::new()));
//! let router = create_router(app_state);
//! ```

/// Main router creation
pub mod router;

// Re-export commonly used functions
pub use router::create_router;
