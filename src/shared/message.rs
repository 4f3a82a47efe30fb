/**
 * Sync Message Wire Format
 *
 * This module defines the JSON message exchanged between clients and the
 * server over the `/ws` connection. The same struct carries client requests
 * (`sync`, `update`) and server replies (`sync-full`, `sync-ack`).
 *
 * # Wire Format
 *
 * ```json
 * {
 *   "type": "sync",
 *   "docId": "doc-123",
 *   "version": 4,
 *   "payload": "aGVsbG8=",
 *   "clientId": "client-a"
 * }
 * ```
 *
 * `payload` is the opaque document state encoded as standard base64. It is
 * omitted when the message carries no state.
 */
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Kind of a sync message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    /// Client announces its version (and state) and asks to be reconciled
    Sync,
    /// Client pushes a new state to be relayed to peers and persisted
    Update,
    /// Generic server reply
    SyncResponse,
    /// Server reply carrying the full authoritative state
    SyncFull,
    /// Server reply confirming the client is up to date
    SyncAck,
}

impl MessageType {
    /// Whether clients are allowed to send this message type
    pub fn is_client_request(&self) -> bool {
        matches!(self, Self::Sync | Self::Update)
    }
}

/// A single message on the sync connection
///
/// Messages are immutable once sent; the server builds a fresh message for
/// every reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncMessage {
    /// Message kind
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    /// Document this message is about
    pub doc_id: String,
    /// Version the sender holds (requests) or the server holds (replies)
    pub version: i64,
    /// Opaque document state
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "payload_base64"
    )]
    pub payload: Option<Bytes>,
    /// Identifier of the client the message originates from or is addressed to
    #[serde(default)]
    pub client_id: String,
}

impl SyncMessage {
    /// Build a `sync` request
    pub fn sync(doc_id: impl Into<String>, version: i64, payload: Option<Bytes>) -> Self {
        Self {
            msg_type: MessageType::Sync,
            doc_id: doc_id.into(),
            version,
            payload,
            client_id: String::new(),
        }
    }

    /// Build an `update` request
    pub fn update(doc_id: impl Into<String>, version: i64, payload: impl Into<Bytes>) -> Self {
        Self {
            msg_type: MessageType::Update,
            doc_id: doc_id.into(),
            version,
            payload: Some(payload.into()),
            client_id: String::new(),
        }
    }

    /// Build a `sync-full` reply carrying the authoritative state
    pub fn sync_full(
        doc_id: impl Into<String>,
        version: i64,
        content: impl Into<Bytes>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            msg_type: MessageType::SyncFull,
            doc_id: doc_id.into(),
            version,
            payload: Some(content.into()),
            client_id: client_id.into(),
        }
    }

    /// Build a `sync-ack` reply
    pub fn sync_ack(doc_id: impl Into<String>, version: i64, client_id: impl Into<String>) -> Self {
        Self {
            msg_type: MessageType::SyncAck,
            doc_id: doc_id.into(),
            version,
            payload: None,
            client_id: client_id.into(),
        }
    }

    /// Set the client id on a message
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Payload bytes, or an empty buffer when absent
    pub fn payload_or_empty(&self) -> Bytes {
        self.payload.clone().unwrap_or_default()
    }

    /// Decode a message from a JSON frame
    pub fn decode(data: &[u8]) -> Result<Self, SharedError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Encode a message as a JSON string
    pub fn encode(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Base64 encoding/decoding for the optional payload field
pub(crate) mod payload_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(payload: &Option<Bytes>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match payload {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Bytes>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = Option::<String>::deserialize(deserializer)?;
        encoded
            .map(|s| STANDARD.decode(s).map(Bytes::from))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
