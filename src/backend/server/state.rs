/**
 * Application State Management
 *
 * `AppState` is the router state. The `FromRef` implementations let handlers
 * and middleware extract only the part they need: handlers take
 * `State<DocumentModel>`, the auth middleware takes
 * `State<Arc<TokenVerifier>>`.
 *
 * There is no process-wide document cache: every request reads through the
 * store.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::TokenVerifier;
use crate::backend::documents::DocumentModel;

/// Shared state for the Axum application
#[derive(Clone, Debug)]
pub struct AppState {
    /// Document service over the configured store
    pub documents: DocumentModel,

    /// Bearer token verification
    pub tokens: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(documents: DocumentModel, tokens: TokenVerifier) -> Self {
        Self {
            documents,
            tokens: Arc::new(tokens),
        }
    }
}

impl FromRef<AppState> for DocumentModel {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.documents.clone()
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}
