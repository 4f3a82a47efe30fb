/**
 * Connection Hub
 *
 * The hub is the single owner of document room membership: a map from
 * document id to the sessions watching it. Every operation (register,
 * unregister, broadcast, direct send) runs under one `tokio::sync::Mutex`,
 * so all of them are linearizable with respect to each other. There is no
 * background owner task.
 *
 * # Queue Ownership
 *
 * Each entry stores the only sender of that session's outbound queue.
 * Removing the entry drops the sender, which closes the queue; because an
 * entry can only leave the map once, the queue is closed exactly once.
 *
 * # Slow Consumers
 *
 * Delivery never waits. A session whose queue is full (or already closed)
 * when a frame is offered is evicted on the spot: its entry is removed, its
 * queue closes, and its connection winds down. The other sessions in the room
 * are unaffected.
 */

use std::collections::HashMap;
use std::sync::Arc;
use bytes::Bytes;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::realtime::session::{OutboundFrame, SessionHandle, SessionKey};

struct Registered {
    token: Uuid,
    outbound: mpsc::Sender<OutboundFrame>,
}

type Rooms = HashMap<String, HashMap<String, Registered>>;

/// Outcome of [`Hub::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The session joined the room
    Inserted,
    /// The session replaced an older connection with the same client id
    Replaced,
    /// This exact connection was already registered; nothing changed
    AlreadyRegistered,
}

/// Registry of sessions per document
#[derive(Clone, Default)]
pub struct Hub {
    rooms: Arc<Mutex<Rooms>>,
}

impl Hub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session to its document's room
    pub async fn register(&self, handle: SessionHandle) -> Registration {
        let (key, outbound) = handle.into_parts();
        let mut rooms = self.rooms.lock().await;
        let sessions = rooms.entry(key.doc_id.clone()).or_default();

        let outcome = match sessions.get(&key.id) {
            Some(existing) if existing.token == key.token => return Registration::AlreadyRegistered,
            Some(_) => Registration::Replaced,
            None => Registration::Inserted,
        };
        sessions.insert(
            key.id.clone(),
            Registered {
                token: key.token,
                outbound,
            },
        );

        match outcome {
            Registration::Replaced => tracing::info!(
                "[Hub] Client {} reconnected to document {}, previous connection closed",
                key.id,
                key.doc_id
            ),
            _ => tracing::info!("[Hub] Client {} registered for document {}", key.id, key.doc_id),
        }
        outcome
    }

    /// Remove a session and close its outbound queue
    ///
    /// Returns `false` if this connection was no longer registered (already
    /// unregistered, evicted, or replaced by a reconnect). Safe to call any
    /// number of times.
    pub async fn unregister(&self, key: &SessionKey) -> bool {
        let mut rooms = self.rooms.lock().await;
        let removed = Self::remove_locked(&mut rooms, key);
        if removed {
            tracing::info!("[Hub] Client {} unregistered from document {}", key.id, key.doc_id);
        }
        removed
    }

    /// Deliver `payload` to every session of `doc_id` except `sender_id`
    ///
    /// Returns the number of sessions the payload was queued for. Sessions
    /// that cannot accept it right away are evicted.
    pub async fn broadcast(&self, doc_id: &str, sender_id: &str, payload: Bytes) -> usize {
        let mut rooms = self.rooms.lock().await;
        let Some(sessions) = rooms.get_mut(doc_id) else {
            tracing::debug!("[Hub] No sessions for document {}, nothing to broadcast", doc_id);
            return 0;
        };

        let mut delivered = 0;
        let mut evicted = Vec::new();
        for (session_id, registered) in sessions.iter() {
            if session_id == sender_id {
                continue;
            }
            match registered
                .outbound
                .try_send(OutboundFrame::Payload(payload.clone()))
            {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "[Hub] Outbound queue full for client {} on document {}, disconnecting",
                        session_id,
                        doc_id
                    );
                    evicted.push(session_id.clone());
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("[Hub] Client {} already gone, removing", session_id);
                    evicted.push(session_id.clone());
                }
            }
        }

        for session_id in &evicted {
            sessions.remove(session_id);
        }
        if sessions.is_empty() {
            rooms.remove(doc_id);
        }

        tracing::debug!(
            "[Hub] Broadcast on document {} delivered to {} sessions ({} evicted)",
            doc_id,
            delivered,
            evicted.len()
        );
        delivered
    }

    /// Queue a frame for one session
    ///
    /// Follows the same policy as [`Hub::broadcast`]: a full queue evicts the
    /// session. Returns whether the frame was queued.
    pub async fn send_to(&self, key: &SessionKey, frame: OutboundFrame) -> bool {
        let mut rooms = self.rooms.lock().await;
        let outcome = match rooms
            .get(&key.doc_id)
            .and_then(|sessions| sessions.get(&key.id))
            .filter(|registered| registered.token == key.token)
        {
            Some(registered) => registered.outbound.try_send(frame),
            None => return false,
        };

        match outcome {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    "[Hub] Outbound queue full for client {} on document {}, disconnecting",
                    key.id,
                    key.doc_id
                );
                Self::remove_locked(&mut rooms, key);
                false
            }
            Err(TrySendError::Closed(_)) => {
                Self::remove_locked(&mut rooms, key);
                false
            }
        }
    }

    /// Number of sessions watching `doc_id`
    pub async fn session_count(&self, doc_id: &str) -> usize {
        self.rooms
            .lock()
            .await
            .get(doc_id)
            .map_or(0, |sessions| sessions.len())
    }

    /// Number of documents with at least one session
    pub async fn document_count(&self) -> usize {
        self.rooms.lock().await.len()
    }

    /// Whether `session_id` is registered for `doc_id`
    pub async fn contains(&self, doc_id: &str, session_id: &str) -> bool {
        self.rooms
            .lock()
            .await
            .get(doc_id)
            .is_some_and(|sessions| sessions.contains_key(session_id))
    }

    fn remove_locked(rooms: &mut Rooms, key: &SessionKey) -> bool {
        let Some(sessions) = rooms.get_mut(&key.doc_id) else {
            return false;
        };
        let removed = match sessions.get(&key.id) {
            Some(registered) if registered.token == key.token => sessions.remove(&key.id).is_some(),
            _ => false,
        };
        if sessions.is_empty() {
            rooms.remove(&key.doc_id);
        }
        removed
    }
}
