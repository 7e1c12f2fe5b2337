//! Revoked token entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bearer token invalidated by logout. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RevokedToken {
    /// Row identifier.
    pub id: Uuid,
    /// The exact token string that was revoked.
    pub token: String,
    /// When the token was revoked.
    pub revoked_at: DateTime<Utc>,
}
