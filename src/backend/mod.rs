//! Backend Module
//!
//! Server-side code for blockdoc. Only compiled when the `ssr` feature is
//! enabled.
//!
//! # Architecture
//!
//! - **`server`** - application state, store selection, app creation
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`documents`** - `DocumentModel` and its HTTP handlers
//! - **`store`** - the `DocumentStore` trait and its backends
//! - **`auth`** - JWT verification
//! - **`middleware`** - bearer-token middleware and the `AuthUser` extractor
//! - **`error`** - `BackendError` and its HTTP response conversion
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── server/      - Server initialization and state
//! ├── routes/      - Route configuration
//! ├── documents/   - Document service and handlers
//! ├── store/       - Persistence
//! ├── auth/        - Tokens
//! ├── middleware/  - Request middleware
//! └── error/       - Error types
//! ```
//!
//! # Request flow
//!
//! `auth_middleware` verifies the bearer token and attaches the subject.
//! The handler calls one `DocumentModel` operation, which loads the document
//! from the store, applies the change in memory and writes the whole
//! document back in one atomic `put`. Concurrent writers to the same
//! document resolve last-writer-wins.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Document service and handlers
pub mod documents;

/// Persistence stores
pub mod store;

/// Authentication tokens
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

pub use documents::DocumentModel;
pub use error::BackendError;
pub use server::create_app;
pub use store::{DocumentStore, MemoryStore, SqliteStore, StoreError};
