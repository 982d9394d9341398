//! Process-lifetime cache of fetched bucket summaries.
//!
//! Append-only and never evicted; owned by the request layer through
//! [`crate::state::AppState`] instead of living as a process-global
//! singleton, so tests get a fresh store per server.

use std::sync::{Mutex, PoisonError};

use bucketview_core::BucketSummary;

/// Gateway to the bucket summary store.
pub trait BucketStore: Send + Sync {
    fn buckets(&self) -> Vec<BucketSummary>;
    fn persist_buckets(&self, buckets: &[BucketSummary]);
}

#[derive(Default)]
pub struct InMemoryBucketStore {
    buckets: Mutex<Vec<BucketSummary>>,
}

impl BucketStore for InMemoryBucketStore {
    fn buckets(&self) -> Vec<BucketSummary> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn persist_buckets(&self, buckets: &[BucketSummary]) {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buckets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketview_core::CloudProvider;

    fn summary(name: &str) -> BucketSummary {
        BucketSummary {
            id: format!("token-{name}"),
            name: name.to_string(),
            cloud_provider: CloudProvider::from_name(Some("AWS")),
            region: None,
            created_at: None,
            organization_or_account_name: "Acme".to_string(),
            account_id: "acc1".to_string(),
            size: 0,
            size_human: "0 B".to_string(),
            error_message: None,
        }
    }

    #[test]
    fn test_persist_is_append_only() {
        let store = InMemoryBucketStore::default();
        store.persist_buckets(&[summary("a")]);
        store.persist_buckets(&[summary("b"), summary("c")]);
        let names: Vec<String> = store.buckets().into_iter().map(|b| b.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
