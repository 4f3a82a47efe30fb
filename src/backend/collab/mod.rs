//! Collaborative Sync Module
//!
//! Server side of the document sync protocol: the per-connection session
//! loops, the protocol handler that answers `sync` and relays `update`, and
//! the HTTP handlers that open sessions.
//!
//! # Architecture
//!
//! - **`protocol`** - `SyncProtocolHandler`, version comparison and relay
//! - **`session`** - `ClientSession`, read and write loops
//! - **`handlers`** - WebSocket upgrade, catch-up listing, health
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docsync::backend::collab::SyncProtocolHandler;
//! use docsync::backend::realtime::{Hub, SessionKey};
//! use docsync::backend::store::MemoryDocumentStore;
//! use docsync::shared::SyncMessage;
//!
//! # async fn example() -> Result<(), docsync::backend::error::BackendError> {
//! let handler = SyncProtocolHandler::new(Arc::new(MemoryDocumentStore::new()), Hub::new());
//! let key = SessionKey::new("client-a", "doc-123");
//! let reply = handler.handle_sync(&key, &SyncMessage::sync("doc-123", 0, None)).await?;
//! # Ok(())
//! # }
//! ```

/// Sync protocol handler
pub mod protocol;

/// Per-connection read and write loops
pub mod session;

/// HTTP handlers
pub mod handlers;

pub use handlers::{handle_health, handle_list_documents, handle_ws_upgrade};
pub use protocol::{Relayed, SyncProtocolHandler};
pub use session::ClientSession;
