//! Blockdoc - Main Library
//!
//! Blockdoc stores documents made of absolutely positioned text blocks and
//! serves them over an authenticated JSON API.
//!
//! # Module Structure
//!
//! - **`shared`** - The document block model and the types that cross the
//!   HTTP boundary
//!   - `Document`, `Block`, geometry and typed ids
//!   - Signatures and comments
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - `DocumentModel`, the service every operation goes through
//!   - `DocumentStore` with in-memory and SQLite implementations
//!   - Axum routes, bearer-token middleware, error responses
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use blockdoc::backend::server::create_app;
//! use blockdoc::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation and not-found failures
//! - `backend::BackendError` adds authorization, storage and request
//!   failures and renders them as JSON responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
