/**
 * Authentication Middleware
 *
 * Protects the `/api` routes. The bearer token is verified against the
 * shared `TokenVerifier` and the resulting subject is attached to the
 * request extensions for handlers to pick up through `AuthUser`.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::TokenVerifier;
use crate::backend::error::BackendError;
use crate::shared::SubjectId;

/// Authenticated requester extracted from the bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject: SubjectId,
}

/// Authentication middleware
///
/// 1. Extracts the token from the `Authorization: Bearer` header
/// 2. Verifies signature and expiry
/// 3. Attaches `AuthenticatedUser` to the request extensions
///
/// Returns 401 Unauthorized if the token is missing or invalid.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing Authorization header");
            BackendError::handler(StatusCode::UNAUTHORIZED, "Missing bearer token")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("[Auth] Invalid Authorization header format");
        BackendError::handler(StatusCode::UNAUTHORIZED, "Invalid Authorization header")
    })?;

    let subject = tokens.verify(token.trim()).map_err(|e| {
        tracing::warn!("[Auth] Rejected token: {}", e);
        BackendError::handler(StatusCode::UNAUTHORIZED, "Invalid or expired token")
    })?;

    tracing::debug!("[Auth] Authenticated {}", subject);
    request
        .extensions_mut()
        .insert(AuthenticatedUser { subject });

    Ok(next.run(request).await)
}

/// Extract the authenticated user that `auth_middleware` stored
pub fn extract_authenticated_user(parts: &Parts) -> Result<AuthenticatedUser, BackendError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
            BackendError::handler(StatusCode::UNAUTHORIZED, "Authentication required")
        })
}

/// Axum extractor for the requesting subject
#[derive(Clone, Debug)]
pub struct AuthUser(pub SubjectId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_authenticated_user(parts).map(|user| AuthUser(user.subject))
    }
}
