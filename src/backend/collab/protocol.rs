/**
 * Sync Protocol Handler
 *
 * Interprets client requests against the document store and decides what to
 * reply or relay. The handler keeps no per-message state; everything it needs
 * is in the message, the session key, the store and the hub.
 *
 * # Sync
 *
 * A `sync` carries the client's version (and optionally its state). The
 * document is created at version 0 on first reference, seeded with the
 * client's payload. Then:
 *
 * - client behind (`version < stored`) - reply `sync-full` with the stored
 *   content and version
 * - client current (`version == stored`) - reply `sync-ack`
 * - client ahead (`version > stored`) - store the client's payload at its
 *   version (last writer wins, whole payload replaces whole payload) and
 *   reply `sync-ack`; if a concurrent write got there first the gated save
 *   is a no-op and the client receives `sync-full` with what is stored
 *
 * # Update
 *
 * An `update` is relayed to every other session on the document right away,
 * then persisted by a detached task through the same version-gated save.
 * Peers may therefore see an update before it is durable. Whatever order the
 * saves land in, the store ends up with the highest version submitted.
 */

use std::cmp::Ordering;
use bytes::Bytes;
use chrono::Utc;
use tokio::task::JoinHandle;

use crate::backend::error::BackendError;
use crate::backend::realtime::{Hub, OutboundFrame, SessionKey};
use crate::backend::store::SharedStore;
use crate::shared::{Document, MessageType, SharedError, SyncMessage};

/// Result of relaying an update
#[derive(Debug)]
pub struct Relayed {
    /// Sessions the payload was queued for
    pub delivered: usize,
    /// Detached persistence task; resolves to whether the write took effect
    pub persisted: JoinHandle<bool>,
}

/// Applies the sync protocol for one hub and one store
#[derive(Clone)]
pub struct SyncProtocolHandler {
    store: SharedStore,
    hub: Hub,
}

impl SyncProtocolHandler {
    /// Create a handler over `store`, relaying through `hub`
    pub fn new(store: SharedStore, hub: Hub) -> Self {
        Self { store, hub }
    }

    /// The document store
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// The connection hub
    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    /// Handle one decoded message from `session`
    ///
    /// Errors are returned to the caller for logging; none of them are
    /// reported to the client.
    pub async fn dispatch(&self, session: &SessionKey, msg: SyncMessage) -> Result<(), BackendError> {
        if !msg.doc_id.is_empty() && msg.doc_id != session.doc_id {
            return Err(BackendError::protocol(format!(
                "message for document {} on a session joined to {}",
                msg.doc_id, session.doc_id
            )));
        }

        match msg.msg_type {
            MessageType::Sync => {
                let reply = self.handle_sync(session, &msg).await?;
                let encoded = reply.encode()?;
                if !self.hub.send_to(session, OutboundFrame::Reply(encoded)).await {
                    tracing::debug!("[Sync] Client {} left before the reply was queued", session.id);
                }
                Ok(())
            }
            MessageType::Update => {
                self.handle_update(session, msg).await;
                Ok(())
            }
            other => Err(SharedError::unexpected(format!("{other:?} is a server-only message type")).into()),
        }
    }

    /// Reconcile the client's version with the stored document
    ///
    /// Returns the reply for the requesting session.
    pub async fn handle_sync(&self, session: &SessionKey, msg: &SyncMessage) -> Result<SyncMessage, BackendError> {
        let doc_id = session.doc_id.as_str();
        let doc = match self.store.get(doc_id).await? {
            Some(doc) => doc,
            None => {
                let seeded = Document::with_content(doc_id, msg.payload_or_empty(), 0);
                self.store.save(&seeded).await?;
                tracing::info!("[Sync] Created document {}", doc_id);
                // A concurrent creator may have won the insert
                self.store.get(doc_id).await?.unwrap_or(seeded)
            }
        };

        let reply = match msg.version.cmp(&doc.version) {
            Ordering::Less => {
                tracing::debug!(
                    "[Sync] Client {} behind on {} (v{} < v{}), sending full state",
                    session.id,
                    doc_id,
                    msg.version,
                    doc.version
                );
                SyncMessage::sync_full(doc_id, doc.version, doc.content, session.id.as_str())
            }
            Ordering::Equal => SyncMessage::sync_ack(doc_id, doc.version, session.id.as_str()),
            Ordering::Greater => {
                tracing::debug!(
                    "[Sync] Client {} ahead on {} (v{} > v{}), accepting its state",
                    session.id,
                    doc_id,
                    msg.version,
                    doc.version
                );
                let incoming = Document {
                    id: doc.id,
                    content: msg.payload_or_empty(),
                    version: msg.version,
                    created_at: doc.created_at,
                    updated_at: Utc::now(),
                };
                if self.store.save(&incoming).await? {
                    SyncMessage::sync_ack(doc_id, msg.version, session.id.as_str())
                } else {
                    // A concurrent write reached v >= client version first
                    let current = self.store.get(doc_id).await?.ok_or_else(|| {
                        BackendError::protocol(format!("document {doc_id} vanished during sync"))
                    })?;
                    tracing::debug!(
                        "[Sync] Client {} lost the race on {} (v{} vs stored v{}), sending full state",
                        session.id,
                        doc_id,
                        msg.version,
                        current.version
                    );
                    SyncMessage::sync_full(doc_id, current.version, current.content, session.id.as_str())
                }
            }
        };
        Ok(reply)
    }

    /// Relay an update to peers and persist it in the background
    pub async fn handle_update(&self, session: &SessionKey, msg: SyncMessage) -> Relayed {
        let payload: Bytes = msg.payload_or_empty();
        let delivered = self
            .hub
            .broadcast(&session.doc_id, &session.id, payload.clone())
            .await;

        let store = self.store.clone();
        let doc = Document::with_content(session.doc_id.clone(), payload, msg.version);
        let persisted = tokio::spawn(async move {
            match store.save(&doc).await {
                Ok(applied) => {
                    if applied {
                        tracing::debug!("[Sync] Persisted {} at v{}", doc.id, doc.version);
                    }
                    applied
                }
                Err(e) => {
                    tracing::error!("[Sync] Failed to persist {} at v{}: {}", doc.id, doc.version, e);
                    false
                }
            }
        });

        Relayed { delivered, persisted }
    }
}
