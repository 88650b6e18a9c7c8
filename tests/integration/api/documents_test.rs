//! Document endpoint tests
//!
//! Create, list, load, replace and delete through the HTTP API.

use axum::http::StatusCode;
use blockdoc::shared::{Document, DocumentView};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_test_server, create_test_user};

#[tokio::test]
async fn test_create_document() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");

    let response = server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Plan" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let document: Document = response.json();
    assert_eq!(document.title(), "Plan");
    assert_eq!(document.owner_id(), &user.subject);
    assert!(document.blocks().is_empty());
}

#[tokio::test]
async fn test_create_document_with_initial_blocks() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");

    let response = server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .json(&json!({
            "title": "Plan",
            "blocks": [
                { "content": "Goals" },
                { "content": "Budget", "position": { "x": 10.0, "y": 20.0 } }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let document: Document = response.json();
    let contents: Vec<&str> = document.blocks().iter().map(|b| b.content.as_str()).collect();
    assert_eq!(contents, vec!["Goals", "Budget"]);
    assert_eq!(document.blocks()[1].position.x, 10.0);
}

#[tokio::test]
async fn test_create_document_empty_title() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");

    let response = server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "  " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn test_list_documents_only_own() {
    let (server, _) = create_test_server();
    let alice = create_test_user("alice");
    let bob = create_test_user("bob");

    for title in ["First", "Second"] {
        server
            .post("/api/documents")
            .authorization_bearer(&alice.token)
            .json(&json!({ "title": title }))
            .await;
    }
    server
        .post("/api/documents")
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "Bob's" }))
        .await;

    let documents: Vec<Document> = server
        .get("/api/documents")
        .authorization_bearer(&alice.token)
        .await
        .json();

    assert_eq!(documents.len(), 2);
    assert!(documents.iter().all(|d| d.owner_id() == &alice.subject));
}

#[tokio::test]
async fn test_get_document_view() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let created: Document = server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Plan", "blocks": [{}] }))
        .await
        .json();

    let response = server
        .get(&format!("/api/documents/{}", created.id()))
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let view: DocumentView = response.json();
    assert_eq!(view.document, created);
    assert!(view.signatures.is_empty());
    assert!(view.comments.is_empty());
}

#[tokio::test]
async fn test_get_unknown_document() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");

    let response = server
        .get(&format!("/api/documents/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_document_with_bad_id_is_json_error() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");

    let response = server
        .get("/api/documents/not-a-uuid")
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "request");
    assert_eq!(body["status"], 400);
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn test_create_document_malformed_json_is_json_error() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");

    let response = server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .text("{\"title\": ")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "request");
}

#[tokio::test]
async fn test_get_foreign_document_forbidden() {
    let (server, _) = create_test_server();
    let alice = create_test_user("alice");
    let bob = create_test_user("bob");
    let created: Document = server
        .post("/api/documents")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Private", "blocks": [{ "content": "secret text" }] }))
        .await
        .json();

    let response = server
        .get(&format!("/api/documents/{}", created.id()))
        .authorization_bearer(&bob.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(!response.text().contains("secret text"));
}

#[tokio::test]
async fn test_replace_document() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let created: Document = server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Draft", "blocks": [{ "content": "a" }, { "content": "b" }] }))
        .await
        .json();

    let mut blocks = created.blocks().to_vec();
    blocks.reverse();
    blocks[0].content = "b edited".to_string();

    let response = server
        .put(&format!("/api/documents/{}", created.id()))
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Final", "blocks": blocks }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let saved: Document = response.json();
    assert_eq!(saved.title(), "Final");
    assert_eq!(saved.blocks(), blocks.as_slice());

    let view: DocumentView = server
        .get(&format!("/api/documents/{}", created.id()))
        .authorization_bearer(&user.token)
        .await
        .json();
    assert_eq!(view.document, saved);
}

#[tokio::test]
async fn test_replace_document_with_invalid_block_keeps_old_state() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let created: Document = server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Draft", "blocks": [{ "content": "a" }] }))
        .await
        .json();

    let mut bad = serde_json::to_value(&created.blocks()[0]).unwrap();
    bad["size"]["width"] = json!(-5.0);

    let response = server
        .put(&format!("/api/documents/{}", created.id()))
        .authorization_bearer(&user.token)
        .json(&json!({ "blocks": [bad] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let view: DocumentView = server
        .get(&format!("/api/documents/{}", created.id()))
        .authorization_bearer(&user.token)
        .await
        .json();
    assert_eq!(view.document, created);
}

#[tokio::test]
async fn test_delete_document() {
    let (server, _) = create_test_server();
    let user = create_test_user("alice");
    let created: Document = server
        .post("/api/documents")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Temp" }))
        .await
        .json();
    let path = format!("/api/documents/{}", created.id());

    let response = server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_foreign_document_not_found() {
    let (server, _) = create_test_server();
    let alice = create_test_user("alice");
    let bob = create_test_user("bob");
    let created: Document = server
        .post("/api/documents")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Mine" }))
        .await
        .json();

    let response = server
        .delete(&format!("/api/documents/{}", created.id()))
        .authorization_bearer(&bob.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
