//! Document comments. Append-only: there is no edit or delete.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::ids::{DocumentId, SubjectId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub document_id: DocumentId,
    pub author_id: SubjectId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        document_id: DocumentId,
        author_id: SubjectId,
        content: impl Into<String>,
    ) -> Result<Self, SharedError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(SharedError::validation("content", "Comment cannot be empty"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            document_id,
            author_id,
            content,
            created_at: Utc::now().trunc_subsecs(3),
        })
    }
}
