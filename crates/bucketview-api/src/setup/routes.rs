//! Route configuration and setup.

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use bucketview_core::Config;

use crate::constants;
use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(&state.config)?;

    let api = Router::new()
        .route("/buckets", get(handlers::buckets::list_buckets))
        .route(
            "/buckets/{bucketIdentityToken}/documents",
            get(handlers::documents::list_documents),
        )
        .route("/files/download", get(handlers::download::download_file))
        .route("/health", get(handlers::health::health_check))
        .route("/openapi.json", get(openapi_json))
        .with_state(state);

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let app = Router::new()
        .nest(constants::API_PREFIX, api)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}

async fn openapi_json() -> impl IntoResponse {
    Json(crate::api_doc::ApiDoc::openapi())
}

/// CORS from configuration; a wildcard origin opens the API up entirely
/// (rejected in production by config validation).
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };
    Ok(cors)
}
