//! Shared Module
//!
//! Types shared between the server and any Rust client of the sync protocol:
//! the wire message, the document model, configuration and error types. None
//! of them depend on the server runtime, so they compile without the `ssr`
//! feature.

/// Sync message wire format
pub mod message;

/// Document data model
pub mod document;

/// Shared error types
pub mod error;

/// Server configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use message::{MessageType, SyncMessage};
pub use document::Document;
pub use error::SharedError;
pub use config::{ConfigError, ServerConfig, ServerConfigBuilder};
