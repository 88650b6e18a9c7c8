/**
 * Backend Error Types
 *
 * This module defines the error taxonomy surfaced by the document model
 * and the HTTP handlers.
 *
 * # Error Categories
 *
 * - `SharedError` - Validation and not-found errors raised by the in-memory
 *   model; never retried
 * - `AuthorizationError` - The requester may not see the document; never
 *   retried
 * - `StorageError` - Persistence store failure, usually transient; callers
 *   may retry with backoff
 * - `HandlerError` - Request-level problems (missing bearer token, ...)
 *
 * The model performs no retries itself; `is_retryable` tells the caller
 * whether a retry can help.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Validation or not-found error from the document model
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// The requester is neither the owner nor an authorized reader
    #[error("Authorization error: {message}")]
    AuthorizationError {
        /// Human-readable error message
        message: String,
    },

    /// Persistence store failure
    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),

    /// Handler error (e.g., missing headers, invalid token)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::AuthorizationError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `ValidationError` - 400 Bad Request
    /// - `NotFoundError` - 404 Not Found
    /// - `AuthorizationError` - 403 Forbidden
    /// - `StorageError` - 503 Service Unavailable when retryable, else 500
    /// - `HandlerError` - Uses the status code from the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::NotFoundError { .. } => StatusCode::NOT_FOUND,
            },
            Self::AuthorizationError { .. } => StatusCode::FORBIDDEN,
            Self::StorageError(err) if err.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HandlerError { status, .. } => *status,
        }
    }

    /// Short machine-readable category, included in error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SharedError(SharedError::ValidationError { .. }) => "validation",
            Self::SharedError(SharedError::NotFoundError { .. }) => "not_found",
            Self::AuthorizationError { .. } => "authorization",
            Self::StorageError(_) => "storage",
            Self::HandlerError { .. } => "request",
        }
    }

    /// Whether repeating the same call later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::StorageError(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Get the error message
    ///
    /// Storage details stay in the logs; callers only learn that the store
    /// failed.
    pub fn message(&self) -> String {
        match self {
            Self::SharedError(err) => err.to_string(),
            Self::AuthorizationError { message } => message.clone(),
            Self::StorageError(StoreError::Timeout { .. }) => {
                "Document store timed out, please retry".to_string()
            }
            Self::StorageError(_) => "Document store unavailable".to_string(),
            Self::HandlerError { message, .. } => message.clone(),
        }
    }
}
