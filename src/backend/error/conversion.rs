/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum so HTTP handlers can
 * return them directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "docId required",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Json, Response},
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("[Http] {}", message);
        } else {
            tracing::debug!("[Http] Rejected request: {}", message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
