//! Document Block Model
//!
//! A `Document` is the authoritative, ordered set of blocks for one owner.
//! Every mutation validates its input before touching state, so an error
//! always leaves the document exactly as it was.
//!
//! # Invariants
//!
//! - The title is non-empty after trimming.
//! - Block ids are unique within the document.
//! - Every block has finite geometry and a strictly positive size.
//! - Block order is insertion order (z-order: later blocks draw on top).
//!   Content and geometry updates never reorder.
//! - The owner is never listed as a reader.
//!
//! Fields are private; a `Document` can only be built through `new` or
//! `from_parts`, both of which check the invariants. Deserialization goes
//! through `from_parts` as well.

use std::collections::BTreeSet;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::block::{Block, NewBlock};
use crate::shared::error::SharedError;
use crate::shared::geometry::{Position, Size};
use crate::shared::ids::{BlockId, DocumentId, SubjectId};

/// Unvalidated document fields, as held by a store or received on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentParts {
    pub id: DocumentId,
    pub owner_id: SubjectId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub readers: BTreeSet<SubjectId>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// An owned collection of ordered blocks plus metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "DocumentParts")]
pub struct Document {
    id: DocumentId,
    owner_id: SubjectId,
    title: String,
    created_at: DateTime<Utc>,
    readers: BTreeSet<SubjectId>,
    blocks: Vec<Block>,
}

fn validate_title(title: &str) -> Result<(), SharedError> {
    if title.trim().is_empty() {
        return Err(SharedError::validation(
            "title",
            "Document title cannot be empty",
        ));
    }
    Ok(())
}

/// Validate a full block list: geometry of each block plus id uniqueness.
fn validate_blocks(blocks: &[Block]) -> Result<(), SharedError> {
    let mut seen = BTreeSet::new();
    for block in blocks {
        block.validate()?;
        if !seen.insert(block.id) {
            return Err(SharedError::validation(
                "blocks",
                format!("duplicate block id {}", block.id),
            ));
        }
    }
    Ok(())
}

impl Document {
    /// Create an empty document owned by `owner_id`.
    pub fn new(owner_id: SubjectId, title: impl Into<String>) -> Result<Self, SharedError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self {
            id: DocumentId::new(),
            owner_id,
            title,
            // Millisecond precision survives every store and JSON unchanged.
            created_at: Utc::now().trunc_subsecs(3),
            readers: BTreeSet::new(),
            blocks: Vec::new(),
        })
    }

    /// Rebuild a document from stored or transmitted parts.
    pub fn from_parts(parts: DocumentParts) -> Result<Self, SharedError> {
        validate_title(&parts.title)?;
        validate_blocks(&parts.blocks)?;
        if parts.readers.contains(&parts.owner_id) {
            return Err(SharedError::validation(
                "readers",
                "the owner cannot also be listed as a reader",
            ));
        }
        Ok(Self {
            id: parts.id,
            owner_id: parts.owner_id,
            title: parts.title,
            created_at: parts.created_at,
            readers: parts.readers,
            blocks: parts.blocks,
        })
    }

    pub fn into_parts(self) -> DocumentParts {
        DocumentParts {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            created_at: self.created_at,
            readers: self.readers,
            blocks: self.blocks,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn owner_id(&self) -> &SubjectId {
        &self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn readers(&self) -> &BTreeSet<SubjectId> {
        &self.readers
    }

    /// Blocks in render order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn is_owned_by(&self, subject: &SubjectId) -> bool {
        &self.owner_id == subject
    }

    /// Owner or an explicitly authorized reader.
    pub fn can_read(&self, subject: &SubjectId) -> bool {
        self.is_owned_by(subject) || self.readers.contains(subject)
    }

    fn position_of(&self, id: BlockId) -> Result<usize, SharedError> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| SharedError::not_found("block", id))
    }

    fn fresh_block_id(&self) -> BlockId {
        loop {
            let id = BlockId::new();
            if self.block(id).is_none() {
                return id;
            }
        }
    }

    /// Append a block on top of the stack.
    pub fn add_block(&mut self, new_block: NewBlock) -> Result<&Block, SharedError> {
        let block = new_block.into_block(self.fresh_block_id())?;
        self.blocks.push(block);
        let last = self.blocks.len() - 1;
        Ok(&self.blocks[last])
    }

    /// Replace a block's content verbatim.
    pub fn update_block_content(
        &mut self,
        id: BlockId,
        content: impl Into<String>,
    ) -> Result<&Block, SharedError> {
        let index = self.position_of(id)?;
        self.blocks[index].content = content.into();
        Ok(&self.blocks[index])
    }

    /// Move and/or resize a block in place. Order is untouched.
    pub fn update_block_geometry(
        &mut self,
        id: BlockId,
        position: Position,
        size: Size,
    ) -> Result<&Block, SharedError> {
        let index = self.position_of(id)?;
        position.validate()?;
        size.validate()?;
        let block = &mut self.blocks[index];
        block.position = position;
        block.size = size;
        Ok(&self.blocks[index])
    }

    pub fn remove_block(&mut self, id: BlockId) -> Result<Block, SharedError> {
        let index = self.position_of(id)?;
        Ok(self.blocks.remove(index))
    }

    /// Swap in a whole new block list, all or nothing.
    pub fn replace_blocks(&mut self, blocks: Vec<Block>) -> Result<(), SharedError> {
        validate_blocks(&blocks)?;
        self.blocks = blocks;
        Ok(())
    }

    pub fn rename(&mut self, title: impl Into<String>) -> Result<(), SharedError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    /// Grant read access. Returns false if the reader was already present.
    pub fn share_with(&mut self, reader: SubjectId) -> Result<bool, SharedError> {
        if reader == self.owner_id {
            return Err(SharedError::validation(
                "reader",
                "a document cannot be shared with its owner",
            ));
        }
        if reader.as_str().trim().is_empty() {
            return Err(SharedError::validation("reader", "reader id cannot be empty"));
        }
        Ok(self.readers.insert(reader))
    }

    pub fn unshare(&mut self, reader: &SubjectId) -> bool {
        self.readers.remove(reader)
    }
}

impl TryFrom<DocumentParts> for Document {
    type Error = SharedError;

    fn try_from(parts: DocumentParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts)
    }
}
