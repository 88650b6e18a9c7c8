//! Route Configuration Module
//!
//! - **`router`** - main router assembly, shared layers and fallback
//! - **`api_routes`** - the authenticated `/api` surface
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports
//! ├── router.rs      - Main router creation
//! └── api_routes.rs  - Document and dashboard endpoints
//! ```
//!
//! `/health` is public. Everything under `/api` passes through
//! `auth_middleware` first.

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
