/**
 * Backend Error Types
 *
 * This module defines error types specific to the sync server. Errors that
 * reach an HTTP handler are converted to JSON responses (see `conversion`);
 * errors raised inside a WebSocket session are logged and end the operation
 * that raised them.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Problems with an HTTP request that carry their own status code.
 *
 * ## Protocol Errors
 *
 * A decoded sync message that breaks a protocol rule, for instance a message
 * about a document other than the one the session joined.
 *
 * ## Store Errors
 *
 * Failures of the document store (database unreachable, query failed).
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use docsync::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "docId required");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::protocol("document mismatch");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing query parameter)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Sync protocol violation
    #[error("Protocol error: {message}")]
    ProtocolError {
        /// Human-readable error message
        message: String,
    },

    /// Document store failure
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `ProtocolError` - 400 Bad Request
    /// - `StoreError` - 500 Internal Server Error
    /// - `SharedError` - 400 for validation/unexpected messages, 500 otherwise
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::ProtocolError { .. } => StatusCode::BAD_REQUEST,
            Self::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::UnexpectedMessage { .. } => StatusCode::BAD_REQUEST,
            },
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::ProtocolError { message, .. } => message.clone(),
            Self::StoreError(err) => err.to_string(),
            Self::SharedError(err) => err.to_string(),
        }
    }
}
