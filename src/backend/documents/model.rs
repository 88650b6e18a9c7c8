/**
 * Document Model Service
 *
 * `DocumentModel` is the single entry point for document operations. Every
 * mutating call is one load, mutate, put cycle against the store: the
 * document is validated and changed in memory first, then written back as a
 * whole. A failed validation never reaches the store, and a failed store
 * write leaves the stored document as it was.
 *
 * # Access rules
 *
 * - The owner may do anything.
 * - Readers may load, sign and comment.
 * - Anyone else gets `AuthorizationError` on load and `NotFoundError` on
 *   mutations, so the existence of a document is not confirmed to them by
 *   a write.
 *
 * # Timeouts
 *
 * Each store call is bounded by `store_timeout`. Expiry surfaces as a
 * retryable `StorageError`; nothing is retried here.
 */

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::error::BackendError;
use crate::backend::store::{DocumentStore, StoreError, StoreResult};
use crate::shared::{
    Block, BlockId, Comment, DashboardStats, Document, DocumentId, DocumentView, NewBlock,
    Position, SharedError, Signature, Size, SubjectId,
};

/// Document operations over a shared store
#[derive(Clone)]
pub struct DocumentModel {
    store: Arc<dyn DocumentStore>,
    store_timeout: Duration,
}

impl std::fmt::Debug for DocumentModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentModel")
            .field("store_timeout", &self.store_timeout)
            .finish_non_exhaustive()
    }
}

type ModelResult<T> = Result<T, BackendError>;

impl DocumentModel {
    pub fn new(store: Arc<dyn DocumentStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn with_timeout<T, F>(&self, operation: &'static str, call: F) -> ModelResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!("[Store] {} failed: {}", operation, e);
                Err(e.into())
            }
            Err(_) => {
                tracing::warn!(
                    "[Store] {} timed out after {:?}",
                    operation,
                    self.store_timeout
                );
                Err(StoreError::Timeout {
                    operation,
                    after: self.store_timeout,
                }
                .into())
            }
        }
    }

    async fn fetch(&self, document_id: DocumentId) -> ModelResult<Document> {
        self.with_timeout("get", self.store.get(document_id))
            .await?
            .ok_or_else(|| SharedError::not_found("document", document_id).into())
    }

    /// Load a document the requester owns. Non-owners see `NotFoundError`.
    async fn load_owned(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
    ) -> ModelResult<Document> {
        let document = self.fetch(document_id).await?;
        if !document.is_owned_by(requester) {
            tracing::debug!(
                "[Documents] {} attempted to modify {} without ownership",
                requester,
                document_id
            );
            return Err(SharedError::not_found("document", document_id).into());
        }
        Ok(document)
    }

    /// Create an empty document owned by `owner`
    pub async fn create_document(&self, title: &str, owner: &SubjectId) -> ModelResult<Document> {
        self.create_document_with_blocks(title, owner, Vec::new()).await
    }

    /// Create a document with initial blocks. Every block is validated before
    /// anything is persisted.
    pub async fn create_document_with_blocks(
        &self,
        title: &str,
        owner: &SubjectId,
        blocks: Vec<NewBlock>,
    ) -> ModelResult<Document> {
        let mut document = Document::new(owner.clone(), title)?;
        for block in blocks {
            document.add_block(block)?;
        }
        self.with_timeout("insert", self.store.insert(&document)).await?;
        tracing::info!(
            "[Documents] Created {} '{}' for {} with {} blocks",
            document.id(),
            document.title(),
            owner,
            document.blocks().len()
        );
        Ok(document)
    }

    /// Load a document for the owner or an authorized reader
    pub async fn load_document(
        &self,
        document_id: DocumentId,
        requester: &SubjectId,
    ) -> ModelResult<Document> {
        let document = self.fetch(document_id).await?;
        if !document.can_read(requester) {
            tracing::warn!(
                "[Documents] Denied {} read access to {}",
                requester,
                document_id
            );
            return Err(BackendError::authorization(
                "You do not have access to this document",
            ));
        }
        Ok(document)
    }

    /// Persist title, readers and the full ordered block list atomically
    pub async fn save_document(&self, document: &Document) -> ModelResult<()> {
        let stored = self.with_timeout("put", self.store.put(document)).await?;
        if !stored {
            return Err(SharedError::not_found("document", document.id()).into());
        }
        tracing::debug!(
            "[Documents] Saved {} ({} blocks)",
            document.id(),
            document.blocks().len()
        );
        Ok(())
    }

    pub async fn add_block(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        new_block: NewBlock,
    ) -> ModelResult<Block> {
        let mut document = self.load_owned(requester, document_id).await?;
        let block = document.add_block(new_block)?.clone();
        self.save_document(&document).await?;
        tracing::info!("[Documents] Added block {} to {}", block.id, document_id);
        Ok(block)
    }

    pub async fn update_block_content(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        block_id: BlockId,
        content: String,
    ) -> ModelResult<Block> {
        let mut document = self.load_owned(requester, document_id).await?;
        let block = document.update_block_content(block_id, content)?.clone();
        self.save_document(&document).await?;
        Ok(block)
    }

    pub async fn update_block_geometry(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        block_id: BlockId,
        position: Position,
        size: Size,
    ) -> ModelResult<Block> {
        let mut document = self.load_owned(requester, document_id).await?;
        let block = document
            .update_block_geometry(block_id, position, size)?
            .clone();
        self.save_document(&document).await?;
        Ok(block)
    }

    pub async fn remove_block(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        block_id: BlockId,
    ) -> ModelResult<Block> {
        let mut document = self.load_owned(requester, document_id).await?;
        let removed = document.remove_block(block_id)?;
        self.save_document(&document).await?;
        tracing::info!("[Documents] Removed block {} from {}", block_id, document_id);
        Ok(removed)
    }

    /// Owner-only full replace of the block list, and the title if given
    pub async fn replace_document(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        title: Option<String>,
        blocks: Vec<Block>,
    ) -> ModelResult<Document> {
        let mut document = self.load_owned(requester, document_id).await?;
        if let Some(title) = title {
            document.rename(title)?;
        }
        document.replace_blocks(blocks)?;
        self.save_document(&document).await?;
        Ok(document)
    }

    pub async fn delete_document(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
    ) -> ModelResult<()> {
        self.load_owned(requester, document_id).await?;
        let deleted = self
            .with_timeout("delete", self.store.delete(document_id))
            .await?;
        if !deleted {
            return Err(SharedError::not_found("document", document_id).into());
        }
        tracing::info!("[Documents] Deleted {}", document_id);
        Ok(())
    }

    /// The owner's documents, newest first
    pub async fn list_documents(&self, owner: &SubjectId) -> ModelResult<Vec<Document>> {
        self.with_timeout("list_by_owner", self.store.list_by_owner(owner)).await
    }

    pub async fn share_document(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        reader: SubjectId,
    ) -> ModelResult<Document> {
        let mut document = self.load_owned(requester, document_id).await?;
        if document.share_with(reader.clone())? {
            self.save_document(&document).await?;
            tracing::info!("[Documents] Shared {} with {}", document_id, reader);
        }
        Ok(document)
    }

    /// Revoke a reader's access. Revoking a subject that was never a reader
    /// is a no-op.
    pub async fn unshare_document(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        reader: &SubjectId,
    ) -> ModelResult<Document> {
        let mut document = self.load_owned(requester, document_id).await?;
        if document.unshare(reader) {
            self.save_document(&document).await?;
            tracing::info!("[Documents] Revoked {} on {}", reader, document_id);
        }
        Ok(document)
    }

    /// Sign as `requester`. Signing twice returns the first signature.
    pub async fn sign_document(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        name: &str,
    ) -> ModelResult<Signature> {
        self.load_document(document_id, requester).await?;
        let signature = Signature::new(document_id, requester.clone(), name)?;
        let recorded = self
            .with_timeout("add_signature", self.store.add_signature(&signature))
            .await?;
        if recorded.id == signature.id {
            tracing::info!("[Documents] {} signed {}", requester, document_id);
        }
        Ok(recorded)
    }

    pub async fn add_comment(
        &self,
        requester: &SubjectId,
        document_id: DocumentId,
        content: &str,
    ) -> ModelResult<Comment> {
        self.load_document(document_id, requester).await?;
        let comment = Comment::new(document_id, requester.clone(), content)?;
        self.with_timeout("add_comment", self.store.add_comment(&comment)).await?;
        Ok(comment)
    }

    pub async fn comments(
        &self,
        document_id: DocumentId,
        requester: &SubjectId,
    ) -> ModelResult<Vec<Comment>> {
        self.load_document(document_id, requester).await?;
        self.with_timeout("comments", self.store.comments(document_id)).await
    }

    /// Document together with its signatures and comments
    pub async fn document_view(
        &self,
        document_id: DocumentId,
        requester: &SubjectId,
    ) -> ModelResult<DocumentView> {
        let document = self.load_document(document_id, requester).await?;
        let signatures = self
            .with_timeout("signatures", self.store.signatures(document_id))
            .await?;
        let comments = self
            .with_timeout("comments", self.store.comments(document_id))
            .await?;
        Ok(DocumentView {
            document,
            signatures,
            comments,
        })
    }

    /// Counters over the owner's documents, computed on every call
    pub async fn dashboard(&self, owner: &SubjectId) -> ModelResult<DashboardStats> {
        let documents = self.list_documents(owner).await?;
        let mut stats = DashboardStats {
            total_documents: documents.len(),
            ..DashboardStats::default()
        };
        for document in &documents {
            stats.total_blocks += document.blocks().len();
            if !document.readers().is_empty() {
                stats.shared_documents += 1;
            }
            let signatures = self
                .with_timeout("signatures", self.store.signatures(document.id()))
                .await?;
            if !signatures.is_empty() {
                stats.signed_documents += 1;
            }
        }
        Ok(stats)
    }
}
