//! In-memory document store.
//!
//! All state sits behind one `RwLock`, so every operation (and in particular
//! `put`) is atomic with respect to every other. Contents are lost on
//! restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError, StoreResult};
use crate::shared::{Comment, Document, DocumentId, Signature, SubjectId};

#[derive(Debug, Default)]
struct MemoryInner {
    documents: HashMap<DocumentId, Document>,
    signatures: HashMap<DocumentId, Vec<Signature>>,
    comments: HashMap<DocumentId, Vec<Comment>>,
}

/// `DocumentStore` backed by process memory
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage: while unavailable every call fails with
    /// `StoreError::Unavailable` and nothing is read or written.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::unavailable("memory store is offline"))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        self.check_available()?;
        Ok(self.inner.read().await.documents.get(&id).cloned())
    }

    async fn insert(&self, document: &Document) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        if inner.documents.contains_key(&document.id()) {
            return Err(StoreError::Corrupt {
                document: document.id(),
                message: "a document with this id already exists".to_string(),
            });
        }
        inner.documents.insert(document.id(), document.clone());
        Ok(())
    }

    async fn put(&self, document: &Document) -> StoreResult<bool> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        match inner.documents.get_mut(&document.id()) {
            Some(slot) => {
                *slot = document.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: DocumentId) -> StoreResult<bool> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        let existed = inner.documents.remove(&id).is_some();
        inner.signatures.remove(&id);
        inner.comments.remove(&id);
        Ok(existed)
    }

    async fn list_by_owner(&self, owner: &SubjectId) -> StoreResult<Vec<Document>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        let mut documents: Vec<Document> = inner
            .documents
            .values()
            .filter(|d| d.is_owned_by(owner))
            .cloned()
            .collect();
        documents.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(documents)
    }

    async fn signatures(&self, id: DocumentId) -> StoreResult<Vec<Signature>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.signatures.get(&id).cloned().unwrap_or_default())
    }

    async fn add_signature(&self, signature: &Signature) -> StoreResult<Signature> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        let entries = inner.signatures.entry(signature.document_id).or_default();
        if let Some(existing) = entries.iter().find(|s| s.signer_id == signature.signer_id) {
            return Ok(existing.clone());
        }
        entries.push(signature.clone());
        Ok(signature.clone())
    }

    async fn comments(&self, id: DocumentId) -> StoreResult<Vec<Comment>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.comments.get(&id).cloned().unwrap_or_default())
    }

    async fn add_comment(&self, comment: &Comment) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        inner
            .comments
            .entry(comment.document_id)
            .or_default()
            .push(comment.clone());
        Ok(())
    }
}
