//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;

use bucketview_core::Config;
use bucketview_storage::AccountRegistry;

use crate::state::AppState;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first
    crate::telemetry::init_telemetry();

    tracing::info!(
        accounts = config.accounts.len(),
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    // Connect every configured account into the immutable registry
    let registry = AccountRegistry::connect(&config);

    let state = Arc::new(AppState::new(config, registry));

    // Setup routes
    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
