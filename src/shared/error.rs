//! Shared Error Types
//!
//! This module defines the errors raised by the in-memory document model.
//! They carry no transport or storage detail, so the same values surface
//! whether a mutation arrives from an HTTP handler, a test, or a future
//! real-time channel.
//!
//! # Error Categories
//!
//! - `ValidationError` - Bad input shape (empty title, non-positive size, ...)
//! - `NotFoundError` - Unknown document or block id
//!
//! # Usage
//!
//! ```rust
//! use blockdoc::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Document title cannot be empty");
//! assert!(!error.is_retryable());
//! ```
use thiserror::Error;

/// Errors produced by document model operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A document or block id that does not resolve
    #[error("{entity} not found: {id}")]
    NotFoundError {
        /// Kind of entity that was looked up ("document", "block")
        entity: &'static str,
        /// The id that failed to resolve
        id: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFoundError {
            entity,
            id: id.to_string(),
        }
    }

    /// Model errors always require the caller to change its input.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
