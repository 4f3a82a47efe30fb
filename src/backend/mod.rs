//! Backend Module
//!
//! This module contains all server-side code of the document sync service:
//! an Axum HTTP server that accepts WebSocket sessions per document, answers
//! version handshakes, relays updates between collaborators and persists the
//! latest version of every document.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, store selection
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`collab`** - Sync protocol handler, session loops, HTTP handlers
//! - **`realtime`** - Connection hub and fan-out broadcast
//! - **`store`** - Version-gated document persistence
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs     - Module exports and documentation
//! ├── main.rs    - Server binary
//! ├── server/    - Server initialization and state
//! ├── routes/    - Route configuration
//! ├── collab/    - Sync protocol and sessions
//! ├── realtime/  - Connection hub
//! ├── store/     - Document persistence
//! └── error/     - Error types
//! ```
//!
//! # Data Flow
//!
//! ```text
//! client ──ws──> read loop ──> SyncProtocolHandler ──> DocumentStore
//!                                     │
//!                                     └──> Hub ──> outbound queues ──> write loops ──> clients
//! ```
//!
//! A `sync` request is answered on the requesting session only. An `update`
//! is broadcast to the other sessions on the same document first and then
//! persisted in the background; the store keeps whichever version is highest.
//!
//! # Thread Safety
//!
//! - The hub guards its registry with a single `tokio::sync::Mutex` and never
//!   awaits while holding it
//! - Each session's outbound queue is bounded; a full queue evicts the session
//! - Stores are `Send + Sync` and shared as `Arc<dyn DocumentStore>`

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Sync protocol and client sessions
#[cfg(feature = "ssr")]
pub mod collab;

/// Connection hub
#[cfg(feature = "ssr")]
pub mod realtime;

/// Document persistence
#[cfg(feature = "ssr")]
pub mod store;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use server::{create_app, create_app_with_store};
#[cfg(feature = "ssr")]
pub use collab::{ClientSession, SyncProtocolHandler};
#[cfg(feature = "ssr")]
pub use realtime::Hub;
#[cfg(feature = "ssr")]
pub use store::{DocumentStore, SharedStore};
#[cfg(feature = "ssr")]
pub use error::BackendError;
