//! Request and response bodies for the document HTTP API.

use serde::{Deserialize, Serialize};

use crate::shared::block::{Block, NewBlock};
use crate::shared::comment::Comment;
use crate::shared::document::Document;
use crate::shared::geometry::{Position, Size};
use crate::shared::ids::SubjectId;
use crate::shared::signature::Signature;

/// `POST /api/documents`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateDocumentRequest {
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<NewBlock>,
}

/// `PUT /api/documents/{id}`: full replace of the block list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveDocumentRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateContentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateGeometryRequest {
    pub position: Position,
    pub size: Size,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareRequest {
    pub reader: SubjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentRequest {
    pub content: String,
}

/// A document together with its signatures and comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentView {
    pub document: Document,
    pub signatures: Vec<Signature>,
    pub comments: Vec<Comment>,
}

/// Per-owner counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_documents: usize,
    pub total_blocks: usize,
    /// Documents with at least one reader
    pub shared_documents: usize,
    /// Documents with at least one signature
    pub signed_documents: usize,
}
