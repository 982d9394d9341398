//! Bucket overview integration tests.
//!
//! Run with: `cargo test -p bucketview-api --test buckets_test`

mod helpers;

use helpers::{account, bucket, page, record, server_with, MockStore};

#[tokio::test]
async fn test_bucket_catalog_across_accounts() {
    let aws = account(
        "acc-aws",
        "Acme Prod",
        MockStore {
            region: Some("eu-west-3".to_string()),
            endpoint: Some("https://s3.eu-west-3.amazonaws.com".to_string()),
            buckets: vec![bucket("photos"), bucket("backups")],
            pages: vec![page(vec![record("a/b.txt", 10), record("c.txt", 25)], None)],
            ..MockStore::default()
        },
    );
    let scaleway = account(
        "acc-scw",
        "Acme Lab",
        MockStore {
            region: Some("fr-par".to_string()),
            endpoint: Some("https://s3.fr-par.scw.cloud".to_string()),
            buckets: vec![bucket("archive")],
            pages: vec![page(vec![record("x.bin", 7)], None)],
            ..MockStore::default()
        },
    );
    let server = server_with(vec![aws, scaleway]);

    let response = server.get("/api/buckets").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "OK");

    let buckets = body["data"]["buckets"].as_array().expect("buckets array");
    assert_eq!(buckets.len(), 3);

    let photos = &buckets[0];
    assert_eq!(photos["name"], "photos");
    assert_eq!(photos["accountId"], "acc-aws");
    assert_eq!(photos["organizationOrAccountName"], "Acme Prod");
    assert_eq!(photos["region"], "eu-west-3");
    assert_eq!(photos["size"], 35);
    assert_eq!(photos["sizeHuman"], "35 B");
    assert_eq!(photos["cloudProvider"]["name"], "AWS");
    assert!(photos["errorMessage"].is_null());
    assert!(!photos["id"].as_str().expect("token").is_empty());

    let archive = &buckets[2];
    assert_eq!(archive["cloudProvider"]["name"], "Scaleway");
    assert_eq!(archive["size"], 7);

    // Stats: one group per provider, sizes summed across that provider's buckets.
    let stats = body["data"]["stats"].as_array().expect("stats array");
    assert_eq!(stats.len(), 2);
    let aws_stat = stats
        .iter()
        .find(|stat| stat["cloudProvider"]["name"] == "AWS")
        .expect("AWS stat");
    assert_eq!(aws_stat["size"], 70); // photos + backups share the scripted pages
    let scw_stat = stats
        .iter()
        .find(|stat| stat["cloudProvider"]["name"] == "Scaleway")
        .expect("Scaleway stat");
    assert_eq!(scw_stat["size"], 7);
}

#[tokio::test]
async fn test_failing_account_yields_error_row_not_error_response() {
    let good = account(
        "good",
        "Healthy",
        MockStore {
            region: Some("eu-west-3".to_string()),
            endpoint: Some("https://s3.eu-west-3.amazonaws.com".to_string()),
            buckets: vec![bucket("photos")],
            pages: vec![page(vec![record("a.txt", 1)], None)],
            ..MockStore::default()
        },
    );
    let bad = account(
        "bad",
        "Broken",
        MockStore {
            region: Some("fr-par".to_string()),
            endpoint: Some("https://s3.fr-par.scw.cloud".to_string()),
            bucket_listing_error: Some("connection refused".to_string()),
            ..MockStore::default()
        },
    );
    let server = server_with(vec![good, bad]);

    let response = server.get("/api/buckets").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    let buckets = body["data"]["buckets"].as_array().expect("buckets array");
    assert_eq!(buckets.len(), 2);

    assert_eq!(buckets[0]["name"], "photos");
    assert!(buckets[0]["errorMessage"].is_null());

    let placeholder = &buckets[1];
    assert_eq!(placeholder["accountId"], "bad");
    assert_eq!(placeholder["size"], 0);
    assert_eq!(placeholder["sizeHuman"], "0");
    assert!(placeholder["errorMessage"]
        .as_str()
        .expect("error message")
        .contains("connection refused"));
}

#[tokio::test]
async fn test_empty_registry_returns_empty_catalog() {
    let server = server_with(vec![]);

    let response = server.get("/api/buckets").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["buckets"].as_array().expect("buckets").len(), 0);
    assert_eq!(body["data"]["stats"].as_array().expect("stats").len(), 0);
}

#[tokio::test]
async fn test_health_route() {
    let server = server_with(vec![]);

    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].as_str().is_some());
}
