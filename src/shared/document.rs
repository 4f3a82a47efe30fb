//! Document Data Structure
//!
//! A document is an opaque blob of collaborative state identified by a string
//! id and stamped with a monotonically non-decreasing version. The server never
//! looks inside `content`; conflicts are resolved purely by version.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A collaboratively edited document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document id
    pub id: String,
    /// Opaque document state
    #[serde(with = "content_base64")]
    pub content: Bytes,
    /// Version of `content`
    pub version: i64,
    /// When the document was first stored
    pub created_at: DateTime<Utc>,
    /// When a write last took effect
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create an empty document at version 0
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_content(id, Bytes::new(), 0)
    }

    /// Create a document holding `content` at `version`
    pub fn with_content(id: impl Into<String>, content: impl Into<Bytes>, version: i64) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            content: content.into(),
            version,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a write at `version` would replace this document
    pub fn is_superseded_by(&self, version: i64) -> bool {
        version > self.version
    }
}

mod content_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(content: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(content))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD
            .decode(s)
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}
