//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-process server bound to an ephemeral port
//! - WebSocket client helpers
//! - Database test fixtures

#[cfg(feature = "ssr")]
pub mod server;

// Re-export commonly used utilities
#[cfg(feature = "ssr")]
pub use database::*;
#[cfg(feature = "ssr")]
pub use server::*;
