/**
 * Server Initialization
 *
 * 1. Open the configured store (memory or SQLite)
 * 2. Build the document model and token verifier
 * 3. Assemble the router
 */

use axum::Router;

use crate::backend::auth::TokenVerifier;
use crate::backend::documents::DocumentModel;
use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Build the application state from configuration
pub async fn create_state(config: &AppConfig) -> Result<AppState, BackendError> {
    let store = load_store(config).await?;
    let documents = DocumentModel::new(store, config.store_timeout);
    let tokens = TokenVerifier::new(&config.jwt_secret);
    Ok(AppState::new(documents, tokens))
}

/// Create and configure the Axum application
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing blockdoc server");

    let app_state = create_state(config).await?;
    let app = create_router(app_state);

    tracing::info!(
        "Router configured (store timeout {:?})",
        config.store_timeout
    );
    Ok(app)
}
