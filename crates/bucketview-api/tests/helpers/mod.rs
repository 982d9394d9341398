//! Test helpers: scripted object stores, account registry, and test server.
//!
//! Run from the workspace root: `cargo test -p bucketview-api`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;

use bucketview_api::setup::routes;
use bucketview_api::state::AppState;
use bucketview_core::{Config, ObjectRecord};
use bucketview_storage::{
    AccountHandle, AccountRegistry, BucketEntry, ObjectPage, ObjectStore, StorageError,
    StorageResult,
};

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        documents_page_limit: 3000,
        s3_operation_timeout_secs: 5,
        accounts: Vec::new(),
    }
}

/// Scripted in-memory store standing in for one S3 account.
#[derive(Default)]
pub struct MockStore {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub buckets: Vec<BucketEntry>,
    pub bucket_listing_error: Option<String>,
    /// Listing pages addressed by numeric cursor ("0", "1", ...); a page's
    /// `next_token` should name the index of its successor.
    pub pages: Vec<ObjectPage>,
    /// Objects addressed as "bucket/key".
    pub objects: HashMap<String, Vec<u8>>,
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn list_buckets(&self) -> StorageResult<Vec<BucketEntry>> {
        match &self.bucket_listing_error {
            Some(message) => Err(StorageError::ListBuckets(message.clone())),
            None => Ok(self.buckets.clone()),
        }
    }

    async fn list_objects_page(
        &self,
        _bucket: &str,
        _page_limit: i32,
        continuation: Option<&str>,
    ) -> StorageResult<ObjectPage> {
        let index: usize = continuation.map(|c| c.parse().unwrap_or(0)).unwrap_or(0);
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .get(&format!("{bucket}/{key}"))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn region(&self) -> Option<String> {
        self.region.clone()
    }

    fn endpoint(&self) -> Option<String> {
        self.endpoint.clone()
    }
}

pub fn bucket(name: &str) -> BucketEntry {
    BucketEntry {
        name: Some(name.to_string()),
        created_at: None,
    }
}

pub fn record(key: &str, size: u64) -> ObjectRecord {
    ObjectRecord {
        key: key.to_string(),
        size,
        last_modified: None,
    }
}

pub fn page(records: Vec<ObjectRecord>, next: Option<&str>) -> ObjectPage {
    ObjectPage {
        records,
        next_token: next.map(String::from),
    }
}

pub fn account(id: &str, display_name: &str, store: MockStore) -> AccountHandle {
    AccountHandle {
        id: id.to_string(),
        display_name: display_name.to_string(),
        store: Arc::new(store),
    }
}

/// Test server over a registry of mock accounts.
pub fn server_with(accounts: Vec<AccountHandle>) -> TestServer {
    let state = Arc::new(AppState::new(test_config(), AccountRegistry::new(accounts)));
    let router = routes::setup_routes(state).expect("router setup");
    TestServer::new(router).expect("test server")
}
