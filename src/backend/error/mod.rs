//! Backend Error Module
//!
//! Error types surfaced by the document model and the HTTP handlers.
//!
//! - **`types`** - `BackendError` and its status/kind/retry classification
//! - **`conversion`** - `IntoResponse`, so handlers can return it directly
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - HTTP response conversion
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
