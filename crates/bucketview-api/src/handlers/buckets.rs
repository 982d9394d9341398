//! Bucket overview endpoint.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use bucketview_core::{BucketSummary, ProviderStat};

use crate::error::ErrorResponse;
use crate::handlers::ApiResponse;
use crate::services::catalog;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BucketCatalogData {
    pub buckets: Vec<BucketSummary>,
    pub stats: Vec<ProviderStat>,
}

/// List every bucket across all configured accounts, with per-provider size
/// statistics. Account failures come back as rows carrying an error message,
/// so this endpoint always succeeds with whatever data was reachable.
#[utoipa::path(
    get,
    path = "/api/buckets",
    tag = "buckets",
    responses(
        (status = 200, description = "Buckets across all accounts, with provider stats", body = serde_json::Value),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_buckets(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = catalog::list_all_buckets(&state.registry).await;

    state.bucket_store.persist_buckets(&catalog.buckets);

    tracing::debug!(
        buckets = catalog.buckets.len(),
        providers = catalog.stats.len(),
        "Bucket catalog assembled"
    );

    Json(ApiResponse::ok(BucketCatalogData {
        buckets: catalog.buckets,
        stats: catalog.stats,
    }))
}
