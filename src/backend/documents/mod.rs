//! Documents Module
//!
//! - **`model`** - `DocumentModel`, the service every document operation
//!   goes through
//! - **`handlers`** - Axum handlers for `/api/documents` and `/api/dashboard`

/// Document service over a `DocumentStore`
pub mod model;

/// HTTP handlers
pub mod handlers;

pub use model::DocumentModel;
