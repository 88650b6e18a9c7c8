//! Middleware Module
//!
//! HTTP middleware applied to the `/api` routes.
//!
//! - **`auth`** - bearer-token verification and the `AuthUser` extractor
//! - **`extract`** - body and path extractors that reject with `BackendError`

pub mod auth;
pub mod extract;

pub use auth::{auth_middleware, extract_authenticated_user, AuthUser, AuthenticatedUser};
pub use extract::{ApiJson, ApiPath};
