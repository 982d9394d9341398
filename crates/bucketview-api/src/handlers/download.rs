//! Single-object download endpoint.
//!
//! Returns the object as base64 in a JSON payload; the frontend turns it into
//! a browser download. The `file` query parameter arrives base64-encoded and
//! percent-escaped on top of that.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use bucketview_core::{decode_identity, AppError};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub file: String,
    #[serde(rename = "bucketIdentityToken")]
    pub bucket_identity_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPayload {
    pub file_name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    /// Object bytes, base64-encoded.
    pub content: String,
}

#[utoipa::path(
    get,
    path = "/api/files/download",
    tag = "files",
    params(
        ("file" = String, Query, description = "Base64-encoded object path"),
        ("bucketIdentityToken" = String, Query, description = "Opaque bucket identity token")
    ),
    responses(
        (status = 200, description = "Object content, base64-encoded", body = serde_json::Value),
        (status = 404, description = "Unknown bucket token or missing object", body = ErrorResponse),
        (status = 502, description = "Storage backend unavailable", body = ErrorResponse)
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<DownloadPayload>, HttpAppError> {
    let identity = decode_identity(&query.bucket_identity_token)?;
    let bucket_name = identity.bucket_name.ok_or_else(|| {
        AppError::MissingResource("Token does not reference a bucket".to_string())
    })?;
    let account = state.registry.get(&identity.account_id).ok_or_else(|| {
        AppError::MissingResource(format!("Account {} not found", identity.account_id))
    })?;

    let full_path = decode_file_param(&query.file)?;

    let bytes = account.store.get_object(&bucket_name, &full_path).await?;

    tracing::info!(
        bucket = %bucket_name,
        key = %full_path,
        size_bytes = bytes.len(),
        "Object downloaded"
    );

    Ok(Json(DownloadPayload {
        file_name: file_name_of(&full_path).to_string(),
        file_type: extension_of(&full_path).to_string(),
        content: STANDARD.encode(bytes),
    }))
}

/// The `file` parameter is base64 over a percent-escaped UTF-8 path.
fn decode_file_param(raw: &str) -> Result<String, AppError> {
    let bytes = STANDARD
        .decode(raw)
        .map_err(|err| AppError::InvalidInput(format!("file parameter is not base64: {err}")))?;
    let escaped = String::from_utf8(bytes)
        .map_err(|err| AppError::InvalidInput(format!("file parameter is not UTF-8: {err}")))?;
    let path = urlencoding::decode(&escaped)
        .map_err(|err| AppError::InvalidInput(format!("file parameter is not a valid path: {err}")))?;
    Ok(path.into_owned())
}

fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn extension_of(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
