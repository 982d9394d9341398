//! Bucketview Core Library
//!
//! This crate provides the domain models, configuration, error types, and the
//! two pure algorithms of the dashboard: the bucket-identity codec and the
//! file-tree builder. Everything here is backend-agnostic; talking to an
//! actual object store lives in `bucketview-storage`.

pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod provider;
pub mod tree;

// Re-export commonly used types
pub use config::{AccountConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use identity::{decode_identity, encode_identity, BucketIdentity};
pub use models::{
    human_bytes, BucketSummary, CloudProvider, FileNode, ObjectRecord, ProviderStat,
};
pub use tree::build_file_tree;
