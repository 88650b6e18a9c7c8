/**
 * API Routes
 *
 * # Documents
 * - `GET    /api/documents` - list the caller's documents
 * - `POST   /api/documents` - create, optionally with initial blocks
 * - `GET    /api/documents/{id}` - document with signatures and comments
 * - `PUT    /api/documents/{id}` - replace title and block list
 * - `DELETE /api/documents/{id}` - delete with everything attached
 *
 * # Blocks
 * - `POST   /api/documents/{id}/blocks`
 * - `PATCH  /api/documents/{id}/blocks/{block_id}/content`
 * - `PATCH  /api/documents/{id}/blocks/{block_id}/geometry`
 * - `DELETE /api/documents/{id}/blocks/{block_id}`
 *
 * # Collaboration
 * - `POST   /api/documents/{id}/share`
 * - `DELETE /api/documents/{id}/share/{reader}`
 * - `POST   /api/documents/{id}/sign`
 * - `GET/POST /api/documents/{id}/comments`
 *
 * # Dashboard
 * - `GET    /api/dashboard`
 *
 * All of these require `Authorization: Bearer <token>`.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};

use crate::backend::documents::handlers::{
    add_block, add_comment, create_document, dashboard, delete_document, get_document,
    list_comments, list_documents, remove_block, save_document, share_document, sign_document,
    unshare_document, update_block_content, update_block_geometry,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Add the authenticated API routes to `router`
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let api = Router::new()
        .route("/api/documents", get(list_documents).post(create_document))
        .route(
            "/api/documents/{id}",
            get(get_document).put(save_document).delete(delete_document),
        )
        .route("/api/documents/{id}/blocks", post(add_block))
        .route(
            "/api/documents/{id}/blocks/{block_id}",
            delete(remove_block),
        )
        .route(
            "/api/documents/{id}/blocks/{block_id}/content",
            patch(update_block_content),
        )
        .route(
            "/api/documents/{id}/blocks/{block_id}/geometry",
            patch(update_block_geometry),
        )
        .route("/api/documents/{id}/share", post(share_document))
        .route(
            "/api/documents/{id}/share/{reader}",
            delete(unshare_document),
        )
        .route("/api/documents/{id}/sign", post(sign_document))
        .route(
            "/api/documents/{id}/comments",
            get(list_comments).post(add_comment),
        )
        .route("/api/dashboard", get(dashboard))
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    router.merge(api)
}
