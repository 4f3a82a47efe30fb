/**
 * PostgreSQL Document Store
 *
 * Persists documents in the `documents` table (see
 * `migrations/0001_create_documents.sql`):
 *
 * | column | type |
 * |---|---|
 * | `id` | `TEXT PRIMARY KEY` |
 * | `content` | `BYTEA NOT NULL` |
 * | `version` | `BIGINT NOT NULL` (indexed) |
 * | `created_at` | `TIMESTAMPTZ` |
 * | `updated_at` | `TIMESTAMPTZ` |
 *
 * The version gate lives in the upsert itself (`WHERE documents.version <
 * EXCLUDED.version`), so it holds across concurrent connections without any
 * application-side locking.
 */

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::backend::store::{DocumentStore, StoreError};
use crate::shared::Document;

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    content: Vec<u8>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            content: Bytes::from(row.content),
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Document store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Wrap an existing pool; the schema must already exist
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and run pending migrations
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("[Store] Connecting to database...");
        let pool = PgPool::connect(database_url).await?;
        tracing::info!("[Store] Database connection pool created successfully");

        tracing::info!("[Store] Running database migrations...");
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("[Store] Database migrations completed successfully");

        Ok(Self::new(pool))
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, content, version, created_at, updated_at
            FROM documents
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    async fn save(&self, doc: &Document) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (id, content, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                content = EXCLUDED.content,
                version = EXCLUDED.version,
                updated_at = EXCLUDED.updated_at
            WHERE documents.version < EXCLUDED.version
            "#
        )
        .bind(&doc.id)
        .bind(doc.content.as_ref())
        .bind(doc.version)
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .execute(&self.pool)
        .await?;

        let applied = result.rows_affected() > 0;
        if !applied {
            tracing::debug!("[Store] Ignoring stale write for {} (v{})", doc.id, doc.version);
        }
        Ok(applied)
    }

    async fn list_after(&self, after: i64) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, content, version, created_at, updated_at
            FROM documents
            WHERE version > $1
            ORDER BY version ASC, id ASC
            "#
        )
        .bind(after)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }
}
