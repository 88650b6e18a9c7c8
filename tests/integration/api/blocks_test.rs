//! Block endpoint tests

use axum::http::StatusCode;
use axum_test::TestServer;
use blockdoc::shared::{Block, Document, DocumentView, Position, Size};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_test_server, create_test_user, TestUser};

async fn create_document(server: &TestServer, user: &TestUser) -> Document {
    server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Plan" }))
        .await
        .json()
}

async fn add_block(
    server: &TestServer,
    user: &TestUser,
    document: &Document,
    content: &str,
) -> Block {
    let response = server
        .post(&format!("/api/documents/{}/blocks", document.id()))
        .authorization_bearer(&user.token)
        .json(&json!({ "content": content }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

async fn load(server: &TestServer, user: &TestUser, document: &Document) -> Document {
    let view: DocumentView = server
        .get(&format!("/api/documents/{}", document.id()))
        .authorization_bearer(&user.token)
        .await
        .json();
    view.document
}

#[tokio::test]
async fn test_add_block_defaults() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let document = create_document(&server, &user).await;

    let response = server
        .post(&format!("/api/documents/{}/blocks", document.id()))
        .authorization_bearer(&user.token)
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let block: Block = response.json();
    assert_eq!(block.content, "New Text Block");
    assert_eq!(block.position, Position::new(100.0, 100.0));
    assert_eq!(block.size, Size::new(200.0, 100.0));
}

#[tokio::test]
async fn test_add_block_zero_width_rejected() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let document = create_document(&server, &user).await;

    let response = server
        .post(&format!("/api/documents/{}/blocks", document.id()))
        .authorization_bearer(&user.token)
        .json(&json!({ "size": { "width": 0.0, "height": 10.0 } }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(load(&server, &user, &document).await.blocks().is_empty());
}

#[tokio::test]
async fn test_add_block_mistyped_body_is_json_error() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let document = create_document(&server, &user).await;

    let response = server
        .post(&format!("/api/documents/{}/blocks", document.id()))
        .authorization_bearer(&user.token)
        .json(&json!({ "size": { "width": "wide", "height": 1 } }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "request");
    assert_eq!(body["status"], 422);
    assert_eq!(body["retryable"], false);
    assert!(body["error"].is_string());
    assert!(load(&server, &user, &document).await.blocks().is_empty());
}

#[tokio::test]
async fn test_update_geometry_with_bad_block_id_is_json_error() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let document = create_document(&server, &user).await;

    let response = server
        .patch(&format!("/api/documents/{}/blocks/not-a-uuid/geometry", document.id()))
        .authorization_bearer(&user.token)
        .json(&json!({
            "position": { "x": 0.0, "y": 0.0 },
            "size": { "width": 1.0, "height": 1.0 }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "request");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_update_content_and_geometry_keep_order() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let document = create_document(&server, &user).await;
    let first = add_block(&server, &user, &document, "first").await;
    let second = add_block(&server, &user, &document, "second").await;

    let response = server
        .patch(&format!(
            "/api/documents/{}/blocks/{}/content",
            document.id(),
            first.id
        ))
        .authorization_bearer(&user.token)
        .json(&json!({ "content": "first, edited" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Block = response.json();
    assert_eq!(updated.content, "first, edited");

    let response = server
        .patch(&format!(
            "/api/documents/{}/blocks/{}/geometry",
            document.id(),
            first.id
        ))
        .authorization_bearer(&user.token)
        .json(&json!({
            "position": { "x": -40.0, "y": 900.0 },
            "size": { "width": 50.0, "height": 25.0 }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let loaded = load(&server, &user, &document).await;
    let ids: Vec<_> = loaded.blocks().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(loaded.blocks()[0].position, Position::new(-40.0, 900.0));
    assert_eq!(loaded.blocks()[0].size, Size::new(50.0, 25.0));
    assert_eq!(loaded.blocks()[1], second);
}

#[tokio::test]
async fn test_update_missing_block_not_found() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let document = create_document(&server, &user).await;
    add_block(&server, &user, &document, "only").await;
    let before = load(&server, &user, &document).await;

    let response = server
        .patch(&format!(
            "/api/documents/{}/blocks/{}/content",
            document.id(),
            uuid::Uuid::new_v4()
        ))
        .authorization_bearer(&user.token)
        .json(&json!({ "content": "ghost" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "not_found");
    assert_eq!(load(&server, &user, &document).await, before);
}

#[tokio::test]
async fn test_remove_block() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let document = create_document(&server, &user).await;
    let first = add_block(&server, &user, &document, "first").await;
    let second = add_block(&server, &user, &document, "second").await;

    let path = format!("/api/documents/{}/blocks/{}", document.id(), first.id);
    let response = server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let loaded = load(&server, &user, &document).await;
    assert_eq!(loaded.blocks(), &[second]);

    let response = server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reader_cannot_edit_blocks() {
    let (server, _) = create_test_server();
    let owner = create_test_user("alice");
    let reader = create_test_user("bob");
    let document = create_document(&server, &owner).await;
    server
        .post(&format!("/api/documents/{}/share", document.id()))
        .authorization_bearer(&owner.token)
        .json(&json!({ "reader": "bob" }))
        .await;

    let response = server
        .post(&format!("/api/documents/{}/blocks", document.id()))
        .authorization_bearer(&reader.token)
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(load(&server, &owner, &document).await.blocks().is_empty());
}
