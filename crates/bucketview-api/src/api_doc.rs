//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bucketview API",
        version = "0.1.0",
        description = "Read-oriented dashboard over S3-compatible object storage accounts"
    ),
    paths(
        handlers::buckets::list_buckets,
        handlers::documents::list_documents,
        handlers::download::download_file,
        handlers::health::health_check,
    ),
    components(schemas(error::ErrorResponse)),
    tags(
        (name = "buckets", description = "Bucket overview and document trees"),
        (name = "files", description = "Object downloads"),
        (name = "health", description = "Service probes")
    )
)]
pub struct ApiDoc;
