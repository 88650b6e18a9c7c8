/**
 * SQLite Document Store
 *
 * Durable `DocumentStore` on top of an sqlx SQLite pool. Schema lives in
 * `migrations/` and is applied on connect.
 *
 * # Atomicity
 *
 * `insert` and `put` run in a single transaction that rewrites the
 * document row, its blocks (with an explicit `ordinal` column carrying
 * z-order) and its readers. Dropping the transaction on any error rolls
 * everything back. Reads also run inside a transaction so a concurrent
 * `put` is never observed half-applied.
 */

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoreResult};
use crate::shared::{
    Block, BlockId, Comment, Document, DocumentId, DocumentParts, Position, Signature, Size,
    SubjectId,
};

/// `DocumentStore` backed by SQLite
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    owner_id: String,
    title: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BlockRow {
    id: Uuid,
    content: String,
    position_x: f64,
    position_y: f64,
    width: f64,
    height: f64,
}

#[derive(sqlx::FromRow)]
struct SignatureRow {
    id: Uuid,
    document_id: Uuid,
    signer_id: String,
    name: String,
    signed_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    document_id: Uuid,
    author_id: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<SignatureRow> for Signature {
    fn from(row: SignatureRow) -> Self {
        Signature {
            id: row.id,
            document_id: DocumentId::from_uuid(row.document_id),
            signer_id: SubjectId::new(row.signer_id),
            name: row.name,
            signed_at: row.signed_at,
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            document_id: DocumentId::from_uuid(row.document_id),
            author_id: SubjectId::new(row.author_id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

impl SqliteStore {
    /// Open (creating if needed) the database at `url` and run migrations.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    /// A private in-memory database. One connection, never recycled, since
    /// each SQLite memory connection is its own database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        tracing::info!("[Store] Running database migrations...");
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("[Store] Database migrations completed successfully");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Load blocks and readers for a document row and rebuild the document.
async fn hydrate(conn: &mut SqliteConnection, row: DocumentRow) -> StoreResult<Document> {
    let document_id = DocumentId::from_uuid(row.id);

    let blocks = sqlx::query_as::<_, BlockRow>(
        r#"
        SELECT id, content, position_x, position_y, width, height
        FROM blocks
        WHERE document_id = ?
        ORDER BY ordinal ASC
        "#,
    )
    .bind(row.id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|b| Block {
        id: BlockId::from_uuid(b.id),
        content: b.content,
        position: Position::new(b.position_x, b.position_y),
        size: Size::new(b.width, b.height),
    })
    .collect();

    let readers = sqlx::query_scalar::<_, String>(
        "SELECT reader_id FROM document_readers WHERE document_id = ?",
    )
    .bind(row.id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(SubjectId::new)
    .collect();

    Document::from_parts(DocumentParts {
        id: document_id,
        owner_id: SubjectId::new(row.owner_id),
        title: row.title,
        created_at: row.created_at,
        readers,
        blocks,
    })
    .map_err(|e| StoreError::Corrupt {
        document: document_id,
        message: e.to_string(),
    })
}

/// Rewrite the block sequence and reader set of a document.
async fn write_children(conn: &mut SqliteConnection, document: &Document) -> StoreResult<()> {
    let id = document.id().as_uuid();

    sqlx::query("DELETE FROM blocks WHERE document_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    for (ordinal, block) in document.blocks().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO blocks (document_id, id, ordinal, content, position_x, position_y, width, height)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(block.id.as_uuid())
        .bind(ordinal as i64)
        .bind(&block.content)
        .bind(block.position.x)
        .bind(block.position.y)
        .bind(block.size.width)
        .bind(block.size.height)
        .execute(&mut *conn)
        .await?;
    }

    sqlx::query("DELETE FROM document_readers WHERE document_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    for reader in document.readers() {
        sqlx::query("INSERT INTO document_readers (document_id, reader_id) VALUES (?, ?)")
            .bind(id)
            .bind(reader.as_str())
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, owner_id, title, created_at FROM documents WHERE id = ?",
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let document = match row {
            Some(row) => Some(hydrate(&mut tx, row).await?),
            None => None,
        };
        tx.commit().await?;
        Ok(document)
    }

    async fn insert(&self, document: &Document) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO documents (id, owner_id, title, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(document.id().as_uuid())
        .bind(document.owner_id().as_str())
        .bind(document.title())
        .bind(document.created_at())
        .execute(&mut *tx)
        .await?;
        write_children(&mut tx, document).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn put(&self, document: &Document) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query("UPDATE documents SET title = ? WHERE id = ?")
            .bind(document.title())
            .bind(document.id().as_uuid())
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        write_children(&mut tx, document).await?;
        tx.commit().await?;
        tracing::debug!(
            "[Store] Replaced document {} with {} blocks",
            document.id(),
            document.blocks().len()
        );
        Ok(true)
    }

    async fn delete(&self, id: DocumentId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner: &SubjectId) -> StoreResult<Vec<Document>> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, owner_id, title, created_at
            FROM documents
            WHERE owner_id = ?
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&mut *tx)
        .await?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            documents.push(hydrate(&mut tx, row).await?);
        }
        tx.commit().await?;
        Ok(documents)
    }

    async fn signatures(&self, id: DocumentId) -> StoreResult<Vec<Signature>> {
        let rows = sqlx::query_as::<_, SignatureRow>(
            r#"
            SELECT id, document_id, signer_id, name, signed_at
            FROM signatures
            WHERE document_id = ?
            ORDER BY signed_at ASC, rowid ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Signature::from).collect())
    }

    async fn add_signature(&self, signature: &Signature) -> StoreResult<Signature> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO signatures (id, document_id, signer_id, name, signed_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (document_id, signer_id) DO NOTHING
            "#,
        )
        .bind(signature.id)
        .bind(signature.document_id.as_uuid())
        .bind(signature.signer_id.as_str())
        .bind(&signature.name)
        .bind(signature.signed_at)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, SignatureRow>(
            r#"
            SELECT id, document_id, signer_id, name, signed_at
            FROM signatures
            WHERE document_id = ? AND signer_id = ?
            "#,
        )
        .bind(signature.document_id.as_uuid())
        .bind(signature.signer_id.as_str())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(row.into())
    }

    async fn comments(&self, id: DocumentId) -> StoreResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, document_id, author_id, content, created_at
            FROM comments
            WHERE document_id = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn add_comment(&self, comment: &Comment) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, document_id, author_id, content, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.id)
        .bind(comment.document_id.as_uuid())
        .bind(comment.author_id.as_str())
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
