//! Authentication Module
//!
//! Requests carry `Authorization: Bearer <jwt>`. Tokens are HS256-signed
//! with the shared `JWT_SECRET`; the `sub` claim becomes the requester's
//! [`SubjectId`](crate::shared::SubjectId).
//!
//! Token issuance exists for tests and local tooling. Identity itself is
//! owned by an external provider.

/// JWT issuing and verification
pub mod tokens;

pub use tokens::{AuthError, Claims, TokenVerifier};
