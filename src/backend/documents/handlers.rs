/**
 * Document HTTP Handlers
 *
 * Thin adapters between Axum and `DocumentModel`. The requester always comes
 * from the verified bearer token via `AuthUser`, never from the body.
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::documents::DocumentModel;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::shared::api::{
    CommentRequest, CreateDocumentRequest, SaveDocumentRequest, ShareRequest, SignRequest,
    UpdateContentRequest, UpdateGeometryRequest,
};
use crate::shared::{
    Block, BlockId, Comment, DashboardStats, Document, DocumentId, DocumentView, NewBlock,
    Signature, SubjectId,
};

/// `GET /api/documents`
pub async fn list_documents(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
) -> Result<Json<Vec<Document>>, BackendError> {
    Ok(Json(model.list_documents(&subject).await?))
}

/// `POST /api/documents`
pub async fn create_document(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiJson(request): ApiJson<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), BackendError> {
    let document = model
        .create_document_with_blocks(&request.title, &subject, request.blocks)
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// `GET /api/documents/{id}`
pub async fn get_document(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath(document_id): ApiPath<DocumentId>,
) -> Result<Json<DocumentView>, BackendError> {
    Ok(Json(model.document_view(document_id, &subject).await?))
}

/// `PUT /api/documents/{id}`
pub async fn save_document(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath(document_id): ApiPath<DocumentId>,
    ApiJson(request): ApiJson<SaveDocumentRequest>,
) -> Result<Json<Document>, BackendError> {
    let document = model
        .replace_document(&subject, document_id, request.title, request.blocks)
        .await?;
    Ok(Json(document))
}

/// `DELETE /api/documents/{id}`
pub async fn delete_document(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath(document_id): ApiPath<DocumentId>,
) -> Result<StatusCode, BackendError> {
    model.delete_document(&subject, document_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/documents/{id}/blocks`
pub async fn add_block(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath(document_id): ApiPath<DocumentId>,
    ApiJson(new_block): ApiJson<NewBlock>,
) -> Result<(StatusCode, Json<Block>), BackendError> {
    let block = model.add_block(&subject, document_id, new_block).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// `PATCH /api/documents/{id}/blocks/{block_id}/content`
pub async fn update_block_content(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath((document_id, block_id)): ApiPath<(DocumentId, BlockId)>,
    ApiJson(request): ApiJson<UpdateContentRequest>,
) -> Result<Json<Block>, BackendError> {
    let block = model
        .update_block_content(&subject, document_id, block_id, request.content)
        .await?;
    Ok(Json(block))
}

/// `PATCH /api/documents/{id}/blocks/{block_id}/geometry`
pub async fn update_block_geometry(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath((document_id, block_id)): ApiPath<(DocumentId, BlockId)>,
    ApiJson(request): ApiJson<UpdateGeometryRequest>,
) -> Result<Json<Block>, BackendError> {
    let block = model
        .update_block_geometry(
            &subject,
            document_id,
            block_id,
            request.position,
            request.size,
        )
        .await?;
    Ok(Json(block))
}

/// `DELETE /api/documents/{id}/blocks/{block_id}`
pub async fn remove_block(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath((document_id, block_id)): ApiPath<(DocumentId, BlockId)>,
) -> Result<StatusCode, BackendError> {
    model.remove_block(&subject, document_id, block_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/documents/{id}/share`
pub async fn share_document(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath(document_id): ApiPath<DocumentId>,
    ApiJson(request): ApiJson<ShareRequest>,
) -> Result<Json<Document>, BackendError> {
    let document = model
        .share_document(&subject, document_id, request.reader)
        .await?;
    Ok(Json(document))
}

/// `DELETE /api/documents/{id}/share/{reader}`
pub async fn unshare_document(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath((document_id, reader)): ApiPath<(DocumentId, SubjectId)>,
) -> Result<Json<Document>, BackendError> {
    let document = model.unshare_document(&subject, document_id, &reader).await?;
    Ok(Json(document))
}

/// `POST /api/documents/{id}/sign`
pub async fn sign_document(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath(document_id): ApiPath<DocumentId>,
    ApiJson(request): ApiJson<SignRequest>,
) -> Result<Json<Signature>, BackendError> {
    let signature = model
        .sign_document(&subject, document_id, &request.name)
        .await?;
    Ok(Json(signature))
}

/// `GET /api/documents/{id}/comments`
pub async fn list_comments(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath(document_id): ApiPath<DocumentId>,
) -> Result<Json<Vec<Comment>>, BackendError> {
    Ok(Json(model.comments(document_id, &subject).await?))
}

/// `POST /api/documents/{id}/comments`
pub async fn add_comment(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
    ApiPath(document_id): ApiPath<DocumentId>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), BackendError> {
    let comment = model
        .add_comment(&subject, document_id, &request.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /api/dashboard`
pub async fn dashboard(
    State(model): State<DocumentModel>,
    AuthUser(subject): AuthUser,
) -> Result<Json<DashboardStats>, BackendError> {
    Ok(Json(model.dashboard(&subject).await?))
}
