//! docsync - Main Library
//!
//! docsync is a real-time document synchronization server. Clients open a
//! WebSocket per document, reconcile versions with the server through a small
//! JSON handshake, and then exchange opaque update payloads that the server
//! relays to every other collaborator and persists with last-highest-version
//! semantics.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and clients
//!   - Sync message wire format
//!   - Document model
//!   - Configuration and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server with the `/ws` sync endpoint
//!   - Connection hub with per-session bounded queues
//!   - Sync protocol handler
//!   - PostgreSQL and in-memory document stores
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use docsync::backend::server::init::create_app;
//! use docsync::shared::ServerConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Protocol
//!
//! Every frame is a JSON object:
//!
//! ```json
//! {"type": "sync", "docId": "doc-1", "version": 3, "payload": "<base64>", "clientId": "a"}
//! ```
//!
//! | Type | Direction | Meaning |
//! |---|---|---|
//! | `sync` | client to server | "I am at `version`" |
//! | `update` | client to server | new content at `version`, relayed to peers |
//! | `sync-full` | server to client | server is ahead; `payload` is its content |
//! | `sync-ack` | server to client | versions agree (or server caught up) |
//!
//! Updates relayed to peers are delivered as binary frames carrying the raw
//! payload.
//!
//! # Error Handling
//!
//! - `shared::SharedError` for wire and validation failures
//! - `backend::error::BackendError` for request handling, rendered as JSON
//!   error responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
