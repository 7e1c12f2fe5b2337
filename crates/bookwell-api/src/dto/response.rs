//! Response DTOs.
//!
//! Each endpoint gets its own flat shape; nested summaries never point back
//! at their parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookwell_entity::availability::{AvailabilityWithWindows, Window};
use bookwell_entity::reservation::{Reservation, ReservationDetail};
use bookwell_entity::user::User;
use bookwell_service::account::AuthenticatedUser;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Register and login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

impl From<AuthenticatedUser> for TokenResponse {
    fn from(auth: AuthenticatedUser) -> Self {
        Self {
            user: UserResponse::from(&auth.user),
            token: auth.token.token,
            expires_at: auth.token.expires_at,
        }
    }
}

/// A window inside an availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowResponse {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<Window> for WindowResponse {
    fn from(w: Window) -> Self {
        Self {
            id: w.id,
            start_time: w.start_time,
            end_time: w.end_time,
        }
    }
}

/// An availability with its windows, latest start first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub windows: Vec<WindowResponse>,
}

impl From<AvailabilityWithWindows> for AvailabilityResponse {
    fn from(tree: AvailabilityWithWindows) -> Self {
        let a = tree.availability;
        Self {
            id: a.id,
            name: a.name,
            description: a.description,
            owner_id: a.owner_id,
            created_at: a.created_at,
            windows: tree.windows.into_iter().map(WindowResponse::from).collect(),
        }
    }
}

/// A newly created reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub window_id: Uuid,
    pub booker_id: Uuid,
    pub message: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            window_id: r.window_id,
            booker_id: r.booker_id,
            message: r.message,
            start_time: r.start_time,
            end_time: r.end_time,
            created_at: r.created_at,
        }
    }
}

/// Booker summary inside a listed reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookerSummary {
    pub id: Uuid,
    pub email: String,
}

/// Window summary inside a listed reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSummary {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Availability summary inside a listed reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySummary {
    pub id: Uuid,
    pub name: String,
}

/// One of the caller's reservations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationListItem {
    pub id: Uuid,
    pub message: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub booker: BookerSummary,
    pub window: WindowSummary,
    pub availability: AvailabilitySummary,
}

impl From<ReservationDetail> for ReservationListItem {
    fn from(d: ReservationDetail) -> Self {
        Self {
            id: d.id,
            message: d.message,
            start_time: d.start_time,
            end_time: d.end_time,
            created_at: d.created_at,
            booker: BookerSummary {
                id: d.booker_id,
                email: d.booker_email,
            },
            window: WindowSummary {
                id: d.window_id,
                start_time: d.window_start,
                end_time: d.window_end,
            },
            availability: AvailabilitySummary {
                id: d.availability_id,
                name: d.availability_name,
            },
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Version.
    pub version: String,
    /// Active store backend.
    pub store: String,
}
