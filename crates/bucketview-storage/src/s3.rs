//! S3 implementation of the [`ObjectStore`] capability trait.
//!
//! One client per configured account: static credentials, the account's
//! endpoint override, forced path style (works for AWS and every
//! S3-compatible provider we target), and a per-operation timeout so a hung
//! backend surfaces as a listing error instead of stalling the aggregate
//! response.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};

use bucketview_core::config::AccountConfig;
use bucketview_core::ObjectRecord;

use crate::traits::{BucketEntry, ObjectPage, ObjectStore, StorageError, StorageResult};

/// S3 client for a single configured account.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    region: String,
    endpoint: String,
}

impl S3ObjectStore {
    /// Build the client for one account. Construction is infallible: bad
    /// credentials or endpoints only show up when a call is made, and are
    /// handled by the per-call error policy.
    pub fn new(account: &AccountConfig, operation_timeout: Duration) -> Self {
        let credentials = Credentials::new(
            account.access_key.clone(),
            account.secret_key.clone(),
            None,
            None,
            "bucketview-config",
        );

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(operation_timeout)
            .build();

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(account.region.clone()))
            .endpoint_url(account.endpoint.clone())
            .timeout_config(timeouts)
            .force_path_style(true)
            .build();

        S3ObjectStore {
            client: Client::from_conf(config),
            region: account.region.clone(),
            endpoint: account.endpoint.clone(),
        }
    }
}

/// Map an SDK error to a [`StorageError`], keeping timeouts distinguishable.
fn classify_sdk_error<E, R>(
    err: SdkError<E, R>,
    wrap: fn(String) -> StorageError,
) -> StorageError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::TimeoutError(_) => StorageError::Timeout(message),
        _ => wrap(message),
    }
}

fn to_chrono(timestamp: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_buckets(&self) -> StorageResult<Vec<BucketEntry>> {
        let start = std::time::Instant::now();

        let output = self.client.list_buckets().send().await.map_err(|err| {
            tracing::error!(
                error = %DisplayErrorContext(&err),
                region = %self.region,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 ListBuckets failed"
            );
            classify_sdk_error(err, StorageError::ListBuckets)
        })?;

        let buckets: Vec<BucketEntry> = output
            .buckets()
            .iter()
            .map(|bucket| BucketEntry {
                name: bucket.name().map(String::from),
                created_at: bucket.creation_date().and_then(to_chrono),
            })
            .collect();

        tracing::debug!(
            region = %self.region,
            count = buckets.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 ListBuckets successful"
        );

        Ok(buckets)
    }

    async fn list_objects_page(
        &self,
        bucket: &str,
        page_limit: i32,
        continuation: Option<&str>,
    ) -> StorageResult<ObjectPage> {
        let start = std::time::Instant::now();

        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(page_limit)
            .set_continuation_token(continuation.map(String::from))
            .send()
            .await
            .map_err(|err| {
                tracing::error!(
                    error = %DisplayErrorContext(&err),
                    bucket = %bucket,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 ListObjectsV2 failed"
                );
                classify_sdk_error(err, StorageError::ListObjects)
            })?;

        let records: Vec<ObjectRecord> = output
            .contents()
            .iter()
            .map(|object| ObjectRecord {
                key: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or(0).max(0) as u64,
                last_modified: object.last_modified().and_then(to_chrono),
            })
            .collect();

        // NextContinuationToken is only meaningful on truncated responses.
        let next_token = if output.is_truncated() == Some(true) {
            output.next_continuation_token().map(String::from)
        } else {
            None
        };

        tracing::debug!(
            bucket = %bucket,
            count = records.len(),
            truncated = next_token.is_some(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 ListObjectsV2 successful"
        );

        Ok(ObjectPage { records, next_token })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let start = std::time::Instant::now();

        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_no_such_key())
                {
                    return StorageError::NotFound(key.to_string());
                }
                tracing::error!(
                    error = %DisplayErrorContext(&err),
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 GetObject failed"
                );
                classify_sdk_error(err, StorageError::GetObject)
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|err| StorageError::GetObject(err.to_string()))?;
        let bytes = data.into_bytes().to_vec();

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 GetObject successful"
        );

        Ok(bytes)
    }

    fn region(&self) -> Option<String> {
        Some(self.region.clone())
    }

    fn endpoint(&self) -> Option<String> {
        Some(self.endpoint.clone())
    }
}
