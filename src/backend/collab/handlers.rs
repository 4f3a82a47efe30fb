/**
 * Collaborative Sync Handlers
 *
 * HTTP entry points of the collaboration service:
 *
 * - `GET /ws?docId=..&clientId=..` - upgrade to a sync WebSocket
 * - `GET /documents?after=..` - documents changed after a version, for
 *   clients catching up after being offline
 * - `GET /health` - liveness
 */

use axum::{
    extract::{Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::collab::session::ClientSession;
use crate::backend::error::BackendError;
use crate::backend::realtime::SessionHandle;
use crate::backend::server::state::AppState;
use crate::backend::store::SharedStore;
use crate::shared::{Document, SharedError};

/// Query parameters of the WebSocket endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    /// Document to join (required)
    pub doc_id: Option<String>,
    /// Client identifier; generated when absent
    pub client_id: Option<String>,
}

/// Query parameters of the catch-up endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Exclusive lower version bound; all documents when absent
    pub after: Option<i64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_doc_id(value: Option<String>) -> Result<String, SharedError> {
    non_empty(value).ok_or_else(|| SharedError::validation("docId", "required"))
}

/// Handle WebSocket upgrade (GET /ws)
///
/// The session is registered with the hub only once the upgrade has
/// succeeded; a failed handshake leaves no trace in the registry.
///
/// # Errors
///
/// * `400 Bad Request` - if `docId` is missing or empty
pub async fn handle_ws_upgrade(
    State(app_state): State<AppState>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, BackendError> {
    let doc_id = required_doc_id(params.doc_id)?;
    let client_id = non_empty(params.client_id).unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::debug!("[Collab] Upgrade request from client {} for document {}", client_id, doc_id);

    let config = app_state.config.clone();
    let handler = app_state.sync_handler.clone();
    let failed_client = client_id.clone();

    Ok(ws
        .max_message_size(config.max_message_bytes)
        .max_frame_size(config.max_message_bytes)
        .on_failed_upgrade(move |e| {
            tracing::warn!("[Collab] WebSocket upgrade failed for client {}: {}", failed_client, e);
        })
        .on_upgrade(move |socket| async move {
            let (handle, outbound) =
                SessionHandle::new(client_id, doc_id, config.outbound_queue_capacity);
            let session = ClientSession::new(handle.key().clone());
            handler.hub().register(handle).await;
            session
                .run(socket, outbound, handler, config.write_timeout)
                .await;
        }))
}

/// List documents changed after a version (GET /documents)
///
/// # Errors
///
/// * `500 Internal Server Error` - if the store query fails
pub async fn handle_list_documents(
    State(store): State<SharedStore>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Document>>, BackendError> {
    let after = params.after.unwrap_or(-1);
    let documents = store.list_after(after).await?;
    tracing::debug!("[Collab] {} documents after v{}", documents.len(), after);
    Ok(Json(documents))
}

/// Liveness probe (GET /health)
pub async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
