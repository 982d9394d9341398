//! Domain models shared across crates.
//!
//! Wire shapes use camelCase renames; the JSON payloads are consumed by a
//! dashboard frontend that predates this backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provider::provider_logo_url;

/// One object from a flat bucket listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    /// `/`-delimited path with no leading slash. A trailing slash marks a
    /// directory placeholder object.
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// A node of the materialized file/folder tree.
///
/// Invariants after [`crate::tree::build_file_tree`]: `is_folder` is true iff
/// `children` is present and non-empty, a folder's `size` is the sum of its
/// immediate children's sizes (recursively), and sibling names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub name: String,
    pub full_path: String,
    pub is_folder: bool,
    /// 1-based depth: top-level entries are level 1.
    pub level: usize,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

/// Provider label plus the logo the dashboard renders next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProvider {
    pub name: Option<String>,
    pub logo_url: String,
}

impl CloudProvider {
    pub fn from_name(name: Option<&str>) -> Self {
        CloudProvider {
            name: name.map(String::from),
            logo_url: provider_logo_url(name).to_string(),
        }
    }
}

/// One row of the bucket overview: a (account, bucket) pair, or the synthetic
/// error row for an account whose bucket listing failed entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    /// Opaque identity token (see [`crate::identity`]).
    pub id: String,
    pub name: String,
    pub cloud_provider: CloudProvider,
    pub region: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub organization_or_account_name: String,
    pub account_id: String,
    pub size: u64,
    pub size_human: String,
    pub error_message: Option<String>,
}

/// Per-provider size total, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStat {
    pub cloud_provider: CloudProvider,
    pub size: u64,
    pub size_human: String,
}

const BYTE_UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Human-readable byte count in SI units ("1.5 kB", "35 B").
pub fn human_bytes(size: u64) -> String {
    if size < 1000 {
        return format!("{size} B");
    }
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    let formatted = format!("{value:.1}");
    let formatted = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{} {}", formatted, BYTE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_bytes() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(35), "35 B");
        assert_eq!(human_bytes(999), "999 B");
        assert_eq!(human_bytes(1000), "1 kB");
        assert_eq!(human_bytes(1500), "1.5 kB");
        assert_eq!(human_bytes(1_234_000), "1.2 MB");
        assert_eq!(human_bytes(5_000_000_000), "5 GB");
    }

    #[test]
    fn test_bucket_summary_wire_shape() {
        let summary = BucketSummary {
            id: "token".to_string(),
            name: "photos".to_string(),
            cloud_provider: CloudProvider::from_name(Some("AWS")),
            region: Some("eu-west-3".to_string()),
            created_at: None,
            organization_or_account_name: "Acme".to_string(),
            account_id: "acc1".to_string(),
            size: 35,
            size_human: human_bytes(35),
            error_message: None,
        };
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["sizeHuman"], "35 B");
        assert_eq!(json["organizationOrAccountName"], "Acme");
        assert_eq!(json["cloudProvider"]["name"], "AWS");
        assert!(json["cloudProvider"]["logoUrl"].as_str().is_some());
    }
}
