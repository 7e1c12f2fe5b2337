//! Availability handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CreateAvailabilityBody;
use crate::dto::response::{ApiResponse, AvailabilityResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, AvailabilityId, ValidatedJson};
use crate::state::AppState;

/// GET /api/availabilities
pub async fn list_availabilities(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AvailabilityResponse>>>, ApiError> {
    let items = state.availabilities.list(auth.context()).await?;
    Ok(Json(ApiResponse::ok(
        items.into_iter().map(AvailabilityResponse::from).collect(),
    )))
}

/// POST /api/availabilities
pub async fn create_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateAvailabilityBody>,
) -> Result<(StatusCode, Json<ApiResponse<AvailabilityResponse>>), ApiError> {
    let created = state
        .availabilities
        .create(auth.context(), req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created.into()))))
}

/// GET /api/availabilities/{id}
pub async fn get_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    AvailabilityId(id): AvailabilityId,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, ApiError> {
    let found = state.availabilities.get(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(found.into())))
}

/// PUT /api/availabilities/{id}
pub async fn update_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    AvailabilityId(id): AvailabilityId,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.availabilities.update(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Availability updated",
    ))))
}

/// DELETE /api/availabilities/{id}
pub async fn delete_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    AvailabilityId(id): AvailabilityId,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.availabilities.delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Availability deleted",
    ))))
}
