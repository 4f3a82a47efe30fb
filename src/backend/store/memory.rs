/**
 * In-Memory Document Store
 *
 * Keeps documents in a `HashMap` behind a `tokio::sync::RwLock`. Used when no
 * database is configured and by the test suite. Gating happens under the
 * write lock, so concurrent saves for the same id are serialized and the
 * highest version always ends up stored.
 */

use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::store::{DocumentStore, StoreError};
use crate::shared::Document;

/// Document store living in process memory
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn save(&self, doc: &Document) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&doc.id) {
            Some(stored) if !stored.is_superseded_by(doc.version) => {
                tracing::debug!(
                    "[Store] Ignoring stale write for {} (stored v{}, incoming v{})",
                    doc.id,
                    stored.version,
                    doc.version
                );
                Ok(false)
            }
            Some(stored) => {
                stored.content = doc.content.clone();
                stored.version = doc.version;
                stored.updated_at = doc.updated_at;
                Ok(true)
            }
            None => {
                documents.insert(doc.id.clone(), doc.clone());
                Ok(true)
            }
        }
    }

    async fn list_after(&self, after: i64) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.read().await;
        let mut newer: Vec<Document> = documents
            .values()
            .filter(|doc| doc.version > after)
            .cloned()
            .collect();
        newer.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.id.cmp(&b.id)));
        Ok(newer)
    }
}
