//! Error types module
//!
//! This module provides the core error types used throughout the application.
//! All errors are unified under the `AppError` enum; each variant carries
//! static HTTP/logging metadata so the API layer can render and log errors
//! consistently without matching on variants itself.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed tokens
    Debug,
    /// Warning level - for recoverable issues like a flaky backend
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A bucket-identity token that failed to decode or parse. Surfaced to
    /// callers as "resource not found", never as an internal error.
    #[error("Invalid bucket identity token: {0}")]
    InvalidIdentity(String),

    /// A storage call failed (network, auth, throttling, timeout). Usually
    /// recovered locally into an `errorMessage` field; reaching the HTTP
    /// layer means the whole request depended on the failed call.
    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A referenced account or bucket is not in the known connection set.
    #[error("Not found: {0}")]
    MissingResource(String),

    /// Required configuration absent or invalid at startup. Fatal; the
    /// process does not serve requests.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, sensitive, log_level).
/// Reduces duplication in the ErrorMetadata impl; client_message stays per-variant.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        AppError::InvalidIdentity(_) => (404, "NOT_FOUND", false, false, LogLevel::Debug),
        AppError::BackendUnavailable(_) => (502, "STORAGE_ERROR", true, true, LogLevel::Warn),
        AppError::MissingResource(_) => (404, "NOT_FOUND", false, false, LogLevel::Debug),
        AppError::Configuration(_) => (500, "CONFIGURATION_ERROR", false, true, LogLevel::Error),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, false, LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidIdentity(_) => "InvalidIdentity",
            AppError::BackendUnavailable(_) => "BackendUnavailable",
            AppError::MissingResource(_) => "MissingResource",
            AppError::Configuration(_) => "Configuration",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            // A malformed token and a missing resource are indistinguishable
            // to callers: both read as "no such bucket".
            AppError::InvalidIdentity(_) => "Bucket not found".to_string(),
            AppError::BackendUnavailable(_) => "Failed to reach storage backend".to_string(),
            AppError::MissingResource(ref msg) => msg.clone(),
            AppError::Configuration(_) => "Server is misconfigured".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}
