//! Server Module
//!
//! Server initialization, application state and store selection.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── state.rs  - AppState and FromRef impls
//! ├── config.rs - Document store selection
//! └── init.rs   - Router creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use docsync::backend::server::create_app;
//! use docsync::shared::ServerConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Document store selection
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{create_app, create_app_with_store};
pub use state::AppState;
