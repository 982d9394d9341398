//! Immutable account registry.
//!
//! Built once from configuration at startup and handed to the request layer.
//! There is no ambient connection list: everything that needs an account goes
//! through a registry reference.

use std::sync::Arc;
use std::time::Duration;

use bucketview_core::Config;

use crate::s3::S3ObjectStore;
use crate::traits::ObjectStore;

/// One configured account and its live connection.
#[derive(Clone)]
pub struct AccountHandle {
    pub id: String,
    pub display_name: String,
    pub store: Arc<dyn ObjectStore>,
}

/// Immutable set of connected accounts, in configuration order.
#[derive(Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<AccountHandle>,
}

impl AccountRegistry {
    pub fn new(accounts: Vec<AccountHandle>) -> Self {
        AccountRegistry { accounts }
    }

    /// Connect every configured account.
    pub fn connect(config: &Config) -> Self {
        let operation_timeout = Duration::from_secs(config.s3_operation_timeout_secs);
        let accounts: Vec<AccountHandle> = config
            .accounts
            .iter()
            .map(|account| AccountHandle {
                id: account.id.clone(),
                display_name: account.display_name.clone(),
                store: Arc::new(S3ObjectStore::new(account, operation_timeout))
                    as Arc<dyn ObjectStore>,
            })
            .collect();

        tracing::info!(accounts = accounts.len(), "Connected S3 accounts");
        AccountRegistry { accounts }
    }

    pub fn get(&self, account_id: &str) -> Option<&AccountHandle> {
        self.accounts.iter().find(|account| account.id == account_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountHandle> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
