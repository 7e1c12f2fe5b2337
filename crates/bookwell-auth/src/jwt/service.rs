//! Token issuance, validation and revocation.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use bookwell_core::config::AuthConfig;
use bookwell_core::error::AppError;
use bookwell_core::result::AppResult;

use super::claims::Claims;
use super::decoder::JwtDecoder;
use super::encoder::{IssuedToken, JwtEncoder};
use crate::revocation::RevocationList;

/// Upper bound on configured token lifetime (one year).
const MAX_TTL_MINUTES: u64 = 60 * 24 * 365;

/// Issues, validates and revokes bearer tokens.
///
/// The signing secret is supplied at construction; nothing here reads
/// ambient configuration.
#[derive(Debug, Clone)]
pub struct TokenService {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    revocations: RevocationList,
}

impl TokenService {
    /// Creates a token service from a secret, a lifetime and a revocation list.
    pub fn new(secret: &[u8], ttl: Duration, revocations: RevocationList) -> Self {
        Self {
            encoder: JwtEncoder::new(secret, ttl),
            decoder: JwtDecoder::new(secret),
            revocations,
        }
    }

    /// Creates a token service from auth configuration.
    pub fn from_config(config: &AuthConfig, revocations: RevocationList) -> Self {
        let minutes = config.token_ttl_minutes.min(MAX_TTL_MINUTES) as i64;
        Self::new(
            config.jwt_secret.as_bytes(),
            Duration::minutes(minutes),
            revocations,
        )
    }

    /// Issues a token for `user_id`, valid from now.
    pub fn issue(&self, user_id: Uuid) -> AppResult<IssuedToken> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let issued = self.encoder.encode_at(user_id, now)?;
        debug!(user_id = %user_id, expires_at = %issued.expires_at, "Token issued");
        Ok(issued)
    }

    /// Resolves a token to its user id.
    pub async fn validate(&self, token: &str) -> AppResult<Uuid> {
        self.validate_at(token, Utc::now()).await
    }

    /// Resolves a token to its user id as of `now`.
    ///
    /// Checks run in a fixed order (signature and structure, then expiry,
    /// then revocation) so the reported reason is deterministic.
    pub async fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<Uuid> {
        Ok(self.claims_at(token, now).await?.user_id())
    }

    /// Like [`TokenService::validate_at`] but returns the full claims.
    pub async fn claims_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<Claims> {
        let claims = self.decoder.decode(token)?;

        if claims.is_expired_at(now) {
            return Err(AppError::expired("Token has expired"));
        }

        if self.revocations.contains(token).await? {
            return Err(AppError::revoked("Token has been revoked"));
        }

        Ok(claims)
    }

    /// Permanently revokes this exact token string. Idempotent.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        if self.revocations.revoke(token).await? {
            info!("Token revoked");
        }
        Ok(())
    }
}
