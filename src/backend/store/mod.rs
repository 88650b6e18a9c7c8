//! Persistence Store Module
//!
//! The document model talks to storage only through [`DocumentStore`]. A
//! document record is its title, owner, readers and ordered block list;
//! signatures and comments hang off the document id.
//!
//! # Contract
//!
//! - `put` replaces title, readers and the whole block sequence atomically:
//!   either every change is committed or none is.
//! - Block order is preserved exactly across `put`/`get`.
//! - `delete` cascades to blocks, readers, signatures and comments.
//! - `add_signature` is idempotent per `(document, signer)`: a second call
//!   returns the signature already on record.
//!
//! # Backends
//!
//! - **`memory`** - `MemoryStore`, used when no `DATABASE_URL` is configured
//!   and in tests (supports fault injection)
//! - **`sqlite`** - `SqliteStore`, durable storage through sqlx

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::{Comment, Document, DocumentId, Signature, SubjectId};

/// In-memory store
pub mod memory;

/// SQLite store
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store did not answer within the configured bound
    #[error("store operation '{operation}' timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// The store refused the call (connection lost, shutting down, ...)
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored record no longer satisfies the document invariants
    #[error("corrupt record for document {document}: {message}")]
    Corrupt {
        document: DocumentId,
        message: String,
    },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Whether the same call may succeed if repeated later.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Migration(_) | Self::Corrupt { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed storage for documents and their attachments.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document with its blocks in order.
    async fn get(&self, id: DocumentId) -> StoreResult<Option<Document>>;

    /// Persist a brand-new document.
    async fn insert(&self, document: &Document) -> StoreResult<()>;

    /// Atomically replace an existing document. Returns false if it does not exist.
    async fn put(&self, document: &Document) -> StoreResult<bool>;

    /// Remove a document and everything attached to it. Returns false if absent.
    async fn delete(&self, id: DocumentId) -> StoreResult<bool>;

    /// Documents owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &SubjectId) -> StoreResult<Vec<Document>>;

    /// Signatures on a document, oldest first.
    async fn signatures(&self, id: DocumentId) -> StoreResult<Vec<Signature>>;

    /// Record a signature, or return the signer's existing one.
    async fn add_signature(&self, signature: &Signature) -> StoreResult<Signature>;

    /// Comments on a document, oldest first.
    async fn comments(&self, id: DocumentId) -> StoreResult<Vec<Comment>>;

    async fn add_comment(&self, comment: &Comment) -> StoreResult<()>;
}
