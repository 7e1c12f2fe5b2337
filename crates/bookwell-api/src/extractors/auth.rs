//! `AuthUser` extractor: validates the bearer token and injects context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use bookwell_core::error::AppError;
use bookwell_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Resolved request context.
    pub context: RequestContext,
    /// The raw bearer token, needed to revoke it.
    pub token: String,
}

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::malformed("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::malformed("Authorization header must be 'Bearer <token>'"))?;

        let user_id = state.tokens.validate(token).await?;

        Ok(AuthUser {
            context: RequestContext::new(user_id),
            token: token.to_string(),
        })
    }
}
