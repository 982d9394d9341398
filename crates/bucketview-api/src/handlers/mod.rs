//! HTTP handlers for the dashboard API.

pub mod buckets;
pub mod documents;
pub mod download;
pub mod health;

use serde::Serialize;

/// Response envelope used by every dashboard endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse { status: "OK", data }
    }
}
