//! Multi-account bucket catalog.
//!
//! Fans bucket discovery and size computation out across every configured
//! account, merges the results, and derives per-provider size statistics.
//! Failures stay local to the account or bucket they happened in: a broken
//! account contributes one error row, never an error response.

use std::collections::HashMap;

use futures::future::join_all;

use bucketview_core::{
    encode_identity, human_bytes, provider::infer_provider_name, BucketIdentity, BucketSummary,
    CloudProvider, ProviderStat,
};
use bucketview_storage::{AccountHandle, AccountRegistry, BucketEntry, ObjectStore};

/// Page size for the size-only enumeration (the backend's listing maximum).
const SIZE_SCAN_PAGE_LIMIT: i32 = 1000;

/// Placeholder used in identity tokens when a bucket has no name or an
/// account has no resolvable region.
const UNKNOWN_FIELD: &str = "_";

/// Aggregated catalog returned by [`list_all_buckets`].
#[derive(Debug, Clone)]
pub struct BucketCatalog {
    pub buckets: Vec<BucketSummary>,
    pub stats: Vec<ProviderStat>,
}

/// Build the full catalog across all accounts.
///
/// Accounts are processed concurrently and results assembled in registry
/// order; a slow account delays the response but never cancels or blocks the
/// others' progress.
pub async fn list_all_buckets(registry: &AccountRegistry) -> BucketCatalog {
    let per_account = join_all(registry.iter().map(summarize_account)).await;
    let buckets: Vec<BucketSummary> = per_account.into_iter().flatten().collect();
    let stats = provider_stats(&buckets);
    BucketCatalog { buckets, stats }
}

/// Resolve one account into its summary rows.
async fn summarize_account(account: &AccountHandle) -> Vec<BucketSummary> {
    let store = account.store.as_ref();

    // Region and provider label are configured values; the bucket listing is
    // the only fallible call, and its failure is recorded, not raised.
    let region = store.region();
    let provider = CloudProvider::from_name(infer_provider_name(store.endpoint().as_deref()));

    let (buckets, error_message) = match store.list_buckets().await {
        Ok(buckets) => (buckets, None),
        Err(err) => {
            tracing::warn!(account = %account.id, error = %err, "Account bucket listing failed");
            (Vec::new(), Some(err.to_string()))
        }
    };

    if buckets.is_empty() && error_message.is_some() {
        return vec![placeholder_summary(account, provider, region, error_message)];
    }

    // Sizes for all buckets of this account are computed concurrently.
    join_all(buckets.into_iter().map(|bucket| {
        summarize_bucket(
            account,
            store,
            bucket,
            &provider,
            region.clone(),
            error_message.clone(),
        )
    }))
    .await
}

async fn summarize_bucket(
    account: &AccountHandle,
    store: &dyn ObjectStore,
    bucket: BucketEntry,
    provider: &CloudProvider,
    region: Option<String>,
    error_message: Option<String>,
) -> BucketSummary {
    let name = bucket.name.unwrap_or_else(|| UNKNOWN_FIELD.to_string());

    // A known-bad account skips the size scan entirely.
    let size = if error_message.is_none() {
        bucket_total_size(store, &name).await
    } else {
        0
    };

    let identity = BucketIdentity {
        account_id: account.id.clone(),
        bucket_name: Some(name.clone()),
        region: region.clone().unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
    };

    BucketSummary {
        id: encode_identity(&identity),
        name,
        cloud_provider: provider.clone(),
        region,
        created_at: bucket.created_at,
        organization_or_account_name: account.display_name.clone(),
        account_id: account.id.clone(),
        size,
        size_human: human_bytes(size),
        error_message,
    }
}

/// The single stable row shown for an account whose bucket listing failed.
fn placeholder_summary(
    account: &AccountHandle,
    provider: CloudProvider,
    region: Option<String>,
    error_message: Option<String>,
) -> BucketSummary {
    let identity = BucketIdentity {
        account_id: account.id.clone(),
        bucket_name: None,
        region: region.clone().unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
    };

    BucketSummary {
        id: encode_identity(&identity),
        name: "This".to_string(),
        cloud_provider: provider,
        region,
        created_at: None,
        organization_or_account_name: account.display_name.clone(),
        account_id: account.id.clone(),
        size: 0,
        size_human: "0".to_string(),
        error_message,
    }
}

/// Sum a bucket's object sizes by walking every listing page.
///
/// Pages are folded into a running sum as they arrive and never kept, so
/// memory stays constant past the current page. Any listing error makes the
/// bucket count as empty; siblings are unaffected.
async fn bucket_total_size(store: &dyn ObjectStore, bucket: &str) -> u64 {
    let mut total: u64 = 0;
    let mut continuation: Option<String> = None;

    loop {
        let page = match store
            .list_objects_page(bucket, SIZE_SCAN_PAGE_LIMIT, continuation.as_deref())
            .await
        {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(bucket = %bucket, error = %err, "Bucket size enumeration failed");
                return 0;
            }
        };

        total += page.records.iter().map(|record| record.size).sum::<u64>();

        match page.next_token {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    total
}

/// Group summaries by provider name and sum sizes per group. Unknown
/// providers share the empty-string group; output order is not meaningful.
fn provider_stats(buckets: &[BucketSummary]) -> Vec<ProviderStat> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    for bucket in buckets {
        let key = bucket.cloud_provider.name.clone().unwrap_or_default();
        *totals.entry(key).or_default() += bucket.size;
    }

    totals
        .into_iter()
        .map(|(name, size)| {
            let name = (!name.is_empty()).then_some(name);
            ProviderStat {
                cloud_provider: CloudProvider::from_name(name.as_deref()),
                size,
                size_human: if size > 0 {
                    human_bytes(size)
                } else {
                    "0".to_string()
                },
            }
        })
        .collect()
}
