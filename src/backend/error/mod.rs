//! Backend Error Module
//!
//! Error types of the sync server and their HTTP conversion.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Errors that occur in HTTP handlers
//! - `ProtocolError` - Sync protocol violations
//! - `StoreError` - Document store failures
//! - `SharedError` - Errors from the shared module

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
