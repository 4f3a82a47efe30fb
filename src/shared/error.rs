//! Shared Error Types
//!
//! Errors raised by the wire and data types in `shared`. They are independent
//! of the server so that clients embedding this crate without the `ssr`
//! feature can use them too.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON encoding/decoding of sync messages failed
//! - `ValidationError` - a field holds a value the protocol does not accept
//! - `UnexpectedMessage` - a well-formed message arrived where it is not allowed
use thiserror::Error;

/// Errors produced while handling sync messages and documents
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Message that is valid JSON but not acceptable in this context
    #[error("Unexpected message: {message}")]
    UnexpectedMessage {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unexpected-message error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedMessage {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
