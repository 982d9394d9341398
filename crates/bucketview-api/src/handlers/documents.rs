//! Document tree endpoint: one page of a bucket's keys, materialized as a
//! folder/file tree.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use bucketview_core::{build_file_tree, decode_identity, AppError, FileNode};

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DocumentsQuery {
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTreeData {
    pub files: Vec<FileNode>,
    pub files_count: usize,
    pub next_cursor: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/buckets/{bucketIdentityToken}/documents",
    tag = "buckets",
    params(
        ("bucketIdentityToken" = String, Path, description = "Opaque bucket identity token"),
        ("cursor" = Option<String>, Query, description = "Continuation cursor from the previous page")
    ),
    responses(
        (status = 200, description = "One page of the bucket's file tree", body = serde_json::Value),
        (status = 404, description = "Unknown or malformed bucket token", body = ErrorResponse),
        (status = 502, description = "Storage backend unavailable", body = ErrorResponse)
    )
)]
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Query(query): Query<DocumentsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let identity = decode_identity(&token)?;
    let bucket_name = identity.bucket_name.ok_or_else(|| {
        AppError::MissingResource("Token does not reference a bucket".to_string())
    })?;
    let account = state.registry.get(&identity.account_id).ok_or_else(|| {
        AppError::MissingResource(format!("Account {} not found", identity.account_id))
    })?;

    let page = account
        .store
        .list_objects_page(
            &bucket_name,
            state.config.documents_page_limit,
            query.cursor.as_deref(),
        )
        .await?;

    let files = build_file_tree(&page.records);

    Ok(Json(ApiResponse::ok(DocumentTreeData {
        files,
        files_count: page.records.len(),
        next_cursor: page.next_token,
    })))
}
