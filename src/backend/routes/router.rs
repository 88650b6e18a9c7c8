/**
 * Router Configuration
 *
 * Combines the public health check with the authenticated API routes and
 * wraps everything in request tracing and CORS.
 *
 * # Routes
 *
 * - `GET /health` - liveness probe, no authentication
 * - `/api/...` - see `api_routes`
 *
 * Unknown paths get a JSON 404 in the same shape as every other error.
 */

use axum::{http::StatusCode, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router, app_state.clone());

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Route not found")
}
