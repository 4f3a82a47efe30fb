/**
 * Session Handles
 *
 * A connected client is known to the hub through two pieces:
 *
 * - `SessionKey` - cheap, cloneable identity (session id, document id and a
 *   per-connection token). The connection's loops keep this.
 * - `SessionHandle` - the key plus the single sender of the session's bounded
 *   outbound queue. It is moved into the hub on registration, so the hub holds
 *   the only sender and dropping its entry is what closes the queue.
 *
 * The connection token distinguishes two connections that share a client id:
 * when a client reconnects with the same id, the old connection's teardown
 * cannot remove the new registration.
 */

use bytes::Bytes;
use tokio::sync::mpsc;
use uuid::Uuid;

/// A frame waiting to be written to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Serialized protocol reply, written as a text frame
    Reply(String),
    /// Relayed update payload, written as a binary frame
    Payload(Bytes),
}

impl OutboundFrame {
    /// Size of the frame body in bytes
    pub fn len(&self) -> usize {
        match self {
            Self::Reply(text) => text.len(),
            Self::Payload(bytes) => bytes.len(),
        }
    }

    /// Whether the frame body is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identity of one client connection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    /// Client id (from the `clientId` query parameter or generated)
    pub id: String,
    /// Document the session joined
    pub doc_id: String,
    /// Unique per connection
    pub token: Uuid,
}

impl SessionKey {
    /// Create a key for a fresh connection
    pub fn new(id: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            doc_id: doc_id.into(),
            token: Uuid::new_v4(),
        }
    }
}

/// Registration handle owning the session's outbound sender
#[derive(Debug)]
pub struct SessionHandle {
    key: SessionKey,
    outbound: mpsc::Sender<OutboundFrame>,
}

impl SessionHandle {
    /// Create a handle and its outbound queue for a fresh connection
    pub fn new(
        id: impl Into<String>,
        doc_id: impl Into<String>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<OutboundFrame>) {
        Self::with_key(SessionKey::new(id, doc_id), capacity)
    }

    /// Create a handle for an existing key
    pub fn with_key(key: SessionKey, capacity: usize) -> (Self, mpsc::Receiver<OutboundFrame>) {
        let (outbound, receiver) = mpsc::channel(capacity.max(1));
        (Self { key, outbound }, receiver)
    }

    /// Identity of this session
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub(crate) fn into_parts(self) -> (SessionKey, mpsc::Sender<OutboundFrame>) {
        (self.key, self.outbound)
    }
}
