//! Test server helpers
//!
//! Builds the full router (auth middleware included) around a given store
//! and wraps it in an `axum_test::TestServer`.

use std::sync::Arc;

use axum_test::TestServer;
use blockdoc::backend::auth::TokenVerifier;
use blockdoc::backend::routes::create_router;
use blockdoc::backend::server::AppState;
use blockdoc::backend::{DocumentModel, DocumentStore, MemoryStore};

use super::auth_helpers::TEST_JWT_SECRET;
use super::database::TEST_STORE_TIMEOUT;

/// Test server backed by `store`
pub fn create_test_server_with_store(store: Arc<dyn DocumentStore>) -> TestServer {
    let documents = DocumentModel::new(store, TEST_STORE_TIMEOUT);
    let state = AppState::new(documents, TokenVerifier::new(TEST_JWT_SECRET));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Test server backed by a fresh in-memory store
pub fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let server = create_test_server_with_store(store.clone());
    (server, store)
}
