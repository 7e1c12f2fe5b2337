//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Shipped default secret; only the in-memory backend may run with it.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Bearer token and revocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Number of revoked tokens remembered in process before hitting the store.
    #[serde(default = "default_revocation_cache")]
    pub revocation_cache_capacity: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl(),
            revocation_cache_capacity: default_revocation_cache(),
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    15
}

fn default_revocation_cache() -> u64 {
    10_000
}
