//! Shared Module
//!
//! This module contains the document block model and the types that cross
//! the HTTP boundary. Nothing here touches storage, the network or the
//! clock beyond minting timestamps, so it compiles without the `ssr`
//! feature.
//!
//! # Overview
//!
//! - **`document`** - `Document` and its invariant-preserving editing operations
//! - **`block`**, **`geometry`**, **`ids`** - the pieces a document is built from
//! - **`signature`**, **`comment`** - secondary entities attached to a document
//! - **`api`** - request/response bodies
//! - **`config`** - application configuration

/// Typed identifiers
pub mod ids;

/// Block position and size
pub mod geometry;

/// Text blocks
pub mod block;

/// The document block model
pub mod document;

/// Document signatures
pub mod signature;

/// Document comments
pub mod comment;

/// HTTP request and response bodies
pub mod api;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use api::{DashboardStats, DocumentView};
pub use block::{Block, NewBlock};
pub use comment::Comment;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use document::{Document, DocumentParts};
pub use error::SharedError;
pub use geometry::{Position, Size};
pub use ids::{BlockId, DocumentId, SubjectId};
pub use signature::Signature;
