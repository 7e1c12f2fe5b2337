//! Reservation handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CreateReservationBody;
use crate::dto::response::{ApiResponse, ReservationListItem, ReservationResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/reservations
pub async fn list_reservations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ReservationListItem>>>, ApiError> {
    let items = state.reservations.list_mine(auth.context()).await?;
    Ok(Json(ApiResponse::ok(
        items.into_iter().map(ReservationListItem::from).collect(),
    )))
}

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateReservationBody>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationResponse>>), ApiError> {
    let created = state
        .reservations
        .create(auth.context(), req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created.into()))))
}
