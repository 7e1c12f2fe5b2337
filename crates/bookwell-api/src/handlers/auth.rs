//! Auth handlers: register, login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CredentialsRequest;
use crate::dto::response::{ApiResponse, MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), ApiError> {
    let registered = state.accounts.register(&req.email, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(registered.into())),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let result = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(result.into())))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.accounts.logout(auth.context(), &auth.token).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}
