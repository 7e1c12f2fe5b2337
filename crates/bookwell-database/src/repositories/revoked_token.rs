//! Revoked token repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bookwell_core::result::AppResult;
use bookwell_entity::token::RevokedToken;

use super::db_error;
use crate::store::RevocationStore;

/// Repository for the append-only revoked token table.
#[derive(Debug, Clone)]
pub struct RevokedTokenRepository {
    pool: PgPool,
}

impl RevokedTokenRepository {
    /// Create a new revoked token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the revocation record for a token, if any.
    pub async fn find(&self, token: &str) -> AppResult<Option<RevokedToken>> {
        sqlx::query_as::<_, RevokedToken>("SELECT * FROM revoked_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to look up revoked token"))
    }
}

#[async_trait]
impl RevocationStore for RevokedTokenRepository {
    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        Ok(self.find(token).await?.is_some())
    }

    async fn revoke(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO revoked_tokens (token) VALUES ($1) ON CONFLICT (token) DO NOTHING",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke token"))?;

        Ok(result.rows_affected() == 1)
    }
}
