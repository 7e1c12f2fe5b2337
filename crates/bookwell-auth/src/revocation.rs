//! Revoked token list.

use std::sync::Arc;

use moka::future::Cache;

use bookwell_core::result::AppResult;
use bookwell_database::store::RevocationStore;

/// The durable set of revoked tokens, fronted by an in-process cache.
///
/// Revocation is permanent, so only positive lookups are cached.
#[derive(Clone)]
pub struct RevocationList {
    store: Arc<dyn RevocationStore>,
    cache: Cache<String, ()>,
}

impl std::fmt::Debug for RevocationList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationList")
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl RevocationList {
    /// Creates a revocation list remembering up to `cache_capacity` hits.
    pub fn new(store: Arc<dyn RevocationStore>, cache_capacity: u64) -> Self {
        Self {
            store,
            cache: Cache::builder().max_capacity(cache_capacity).build(),
        }
    }

    /// Whether this exact token string has been revoked.
    pub async fn contains(&self, token: &str) -> AppResult<bool> {
        if self.cache.contains_key(token) {
            return Ok(true);
        }
        let revoked = self.store.is_revoked(token).await?;
        if revoked {
            self.cache.insert(token.to_string(), ()).await;
        }
        Ok(revoked)
    }

    /// Records the token. Returns `true` if it was not already revoked.
    pub async fn revoke(&self, token: &str) -> AppResult<bool> {
        let inserted = self.store.revoke(token).await?;
        self.cache.insert(token.to_string(), ()).await;
        Ok(inserted)
    }
}
