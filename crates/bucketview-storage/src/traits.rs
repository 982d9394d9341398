//! Object storage capability trait.
//!
//! One [`ObjectStore`] exists per configured account. The dashboard core
//! depends only on this surface, never on a concrete backend, which is also
//! what the tests swap out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use bucketview_core::ObjectRecord;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Bucket listing failed: {0}")]
    ListBuckets(String),

    #[error("Object listing failed: {0}")]
    ListObjects(String),

    #[error("Object fetch failed: {0}")]
    GetObject(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage call timed out: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One bucket as reported by the account-level listing.
#[derive(Debug, Clone)]
pub struct BucketEntry {
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of a flat object listing.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub records: Vec<ObjectRecord>,
    /// Cursor for the next page; `None` means the listing is exhausted.
    pub next_token: Option<String>,
}

/// Capability surface of one account connection.
///
/// All suspension points of the dashboard are calls into this trait. Region
/// and endpoint are configured values, exposed here so the aggregation pass
/// can label accounts without reaching into backend-specific configuration.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every bucket visible to this account.
    async fn list_buckets(&self) -> StorageResult<Vec<BucketEntry>>;

    /// Fetch a single page of a flat key listing. `continuation` is the
    /// cursor returned by the previous page.
    async fn list_objects_page(
        &self,
        bucket: &str,
        page_limit: i32,
        continuation: Option<&str>,
    ) -> StorageResult<ObjectPage>;

    /// Fetch a whole object into memory.
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Configured region, if any.
    fn region(&self) -> Option<String>;

    /// Configured endpoint override, if any.
    fn endpoint(&self) -> Option<String>;
}
