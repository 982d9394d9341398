//! Configuration module
//!
//! Environment-driven configuration: server settings plus the set of S3
//! accounts the dashboard reads from. Accounts are declared as
//! `S3_VIEWER_ACCOUNT_<NAME>_<FIELD>` variables; a declared account missing
//! any required field is a startup-time fatal error, never a per-request one.

use std::collections::BTreeMap;
use std::env;

use crate::error::AppError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DOCUMENTS_PAGE_LIMIT: i32 = 3000;
const DEFAULT_S3_OPERATION_TIMEOUT_SECS: u64 = 30;

const ACCOUNT_ENV_PREFIX: &str = "S3_VIEWER_ACCOUNT_";
const REQUIRED_ACCOUNT_FIELDS: [&str; 6] = [
    "ACCESS_KEY",
    "ENDPOINT",
    "ID",
    "NAME",
    "REGION",
    "SECRET_KEY",
];

/// One configured S3 account.
#[derive(Clone, Debug)]
pub struct AccountConfig {
    pub id: String,
    pub display_name: String,
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Page size for the document-listing endpoint.
    pub documents_page_limit: i32,
    /// Per-operation timeout applied to every storage call.
    pub s3_operation_timeout_secs: u64,
    pub accounts: Vec<AccountConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| AppError::Configuration("PORT must be a valid number".to_string()))?,
            cors_origins,
            environment,
            documents_page_limit: env::var("DOCUMENTS_PAGE_LIMIT")
                .unwrap_or_else(|_| DEFAULT_DOCUMENTS_PAGE_LIMIT.to_string())
                .parse()
                .unwrap_or(DEFAULT_DOCUMENTS_PAGE_LIMIT),
            s3_operation_timeout_secs: env::var("S3_OPERATION_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_S3_OPERATION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_S3_OPERATION_TIMEOUT_SECS),
            accounts: parse_accounts(env::vars())?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_production() && self.cors_origins.iter().any(|origin| origin == "*") {
            return Err(AppError::Configuration(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
                    .to_string(),
            ));
        }

        if self.documents_page_limit <= 0 {
            return Err(AppError::Configuration(
                "DOCUMENTS_PAGE_LIMIT must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parse account records out of an environment snapshot.
///
/// Variables look like `S3_VIEWER_ACCOUNT_MAIN_ACCESS_KEY`: the account key
/// runs up to the first underscore after the prefix, the rest is the field
/// name. Accounts come out in deterministic (alphabetical) order.
fn parse_accounts(
    vars: impl Iterator<Item = (String, String)>,
) -> Result<Vec<AccountConfig>, AppError> {
    let mut raw_accounts: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for (key, value) in vars {
        if value.is_empty() {
            continue;
        }
        let Some(rest) = key.strip_prefix(ACCOUNT_ENV_PREFIX) else {
            continue;
        };
        let Some((account_key, field)) = rest.split_once('_') else {
            continue;
        };
        raw_accounts
            .entry(account_key.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    let mut accounts = Vec::with_capacity(raw_accounts.len());
    for (account_key, fields) in raw_accounts {
        for field in REQUIRED_ACCOUNT_FIELDS {
            if !fields.contains_key(field) {
                return Err(AppError::Configuration(format!(
                    "Missing env var: {ACCOUNT_ENV_PREFIX}{account_key}_{field}"
                )));
            }
        }
        accounts.push(AccountConfig {
            id: fields["ID"].clone(),
            display_name: fields["NAME"].clone(),
            endpoint: fields["ENDPOINT"].clone(),
            region: fields["REGION"].clone(),
            access_key: fields["ACCESS_KEY"].clone(),
            secret_key: fields["SECRET_KEY"].clone(),
        });
    }

    Ok(accounts)
}
