//! Application state shared across handlers.

use std::sync::Arc;

use bucketview_core::Config;
use bucketview_storage::AccountRegistry;

use crate::store::{BucketStore, InMemoryBucketStore};

/// Request-layer state: configuration, the immutable account registry, and
/// the process-lifetime bucket cache. Constructed once at startup; nothing in
/// here is mutated afterwards except the append-only cache.
pub struct AppState {
    pub config: Config,
    pub registry: AccountRegistry,
    pub bucket_store: Arc<dyn BucketStore>,
}

impl AppState {
    pub fn new(config: Config, registry: AccountRegistry) -> Self {
        AppState {
            config,
            registry,
            bucket_store: Arc::new(InMemoryBucketStore::default()),
        }
    }
}
