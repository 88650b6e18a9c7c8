//! Text blocks.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::geometry::{Position, Size};
use crate::shared::ids::BlockId;

/// Placeholder content for blocks added without explicit content.
pub const DEFAULT_BLOCK_CONTENT: &str = "New Text Block";

/// Where a block lands when the caller does not say.
pub const DEFAULT_BLOCK_POSITION: Position = Position { x: 100.0, y: 100.0 };

/// Size of a block when the caller does not say.
pub const DEFAULT_BLOCK_SIZE: Size = Size {
    width: 200.0,
    height: 100.0,
};

/// A positioned, sized, editable unit of text within a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    /// Unique within the owning document
    pub id: BlockId,
    /// Arbitrary text, may be empty
    pub content: String,
    /// Top-left corner; unconstrained
    pub position: Position,
    /// Strictly positive width and height
    pub size: Size,
}

impl Block {
    /// Check geometry. Content is never validated.
    pub fn validate(&self) -> Result<(), SharedError> {
        self.position.validate()?;
        self.size.validate()
    }
}

/// Request to add a block. Missing fields fall back to the editor defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewBlock {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub size: Option<Size>,
}

impl NewBlock {
    pub fn new(content: impl Into<String>, position: Position, size: Size) -> Self {
        Self {
            content: Some(content.into()),
            position: Some(position),
            size: Some(size),
        }
    }

    /// Resolve defaults and validate, producing a block with the given id.
    pub(crate) fn into_block(self, id: BlockId) -> Result<Block, SharedError> {
        let block = Block {
            id,
            content: self
                .content
                .unwrap_or_else(|| DEFAULT_BLOCK_CONTENT.to_string()),
            position: self.position.unwrap_or(DEFAULT_BLOCK_POSITION),
            size: self.size.unwrap_or(DEFAULT_BLOCK_SIZE),
        };
        block.validate()?;
        Ok(block)
    }
}
