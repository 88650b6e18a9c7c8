//! Document signatures.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::ids::{DocumentId, SubjectId};

/// A signer's typed-name signature on a document.
///
/// A document carries at most one signature per signer subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signature {
    pub id: Uuid,
    pub document_id: DocumentId,
    /// Subject that signed
    pub signer_id: SubjectId,
    /// Full name as typed by the signer
    pub name: String,
    pub signed_at: DateTime<Utc>,
}

impl Signature {
    pub fn new(
        document_id: DocumentId,
        signer_id: SubjectId,
        name: impl Into<String>,
    ) -> Result<Self, SharedError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(SharedError::validation("name", "Signer name cannot be empty"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            document_id,
            signer_id,
            name: name.to_string(),
            signed_at: Utc::now().trunc_subsecs(3),
        })
    }
}
