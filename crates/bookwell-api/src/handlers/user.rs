//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// DELETE /api/users/me
pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .accounts
        .delete_account(auth.context(), &auth.token)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Account deleted",
    ))))
}
