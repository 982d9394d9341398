//! Opaque bucket identity tokens.
//!
//! A bucket is referenced externally by a token that encodes the full
//! (account, bucket, region) triple, so any process holding a token can
//! resolve it without calling back to whoever issued it. The token is the
//! canonical compact JSON form of [`BucketIdentity`] (field order is fixed by
//! the struct) encoded as unpadded base64url, which survives URL path
//! segments and query strings unescaped.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Composite key identifying one bucket of one configured account.
///
/// `bucket_name` is `None` for the error placeholder emitted when an
/// account's bucket listing failed before any bucket was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketIdentity {
    pub account_id: String,
    pub bucket_name: Option<String>,
    pub region: String,
}

/// Encode an identity into its opaque URL-safe token.
pub fn encode_identity(identity: &BucketIdentity) -> String {
    let json = serde_json::to_string(identity).expect("identity serialization cannot fail");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a token back into the identity it was built from.
///
/// Malformed tokens are an [`AppError::InvalidIdentity`], which the API layer
/// renders as "not found" - a bad token and a nonexistent bucket are the same
/// thing to a caller.
pub fn decode_identity(token: &str) -> Result<BucketIdentity, AppError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|err| AppError::InvalidIdentity(format!("token is not base64url: {err}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| AppError::InvalidIdentity(format!("token payload is not an identity: {err}")))
}
