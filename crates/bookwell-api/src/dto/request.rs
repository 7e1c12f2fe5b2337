//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use bookwell_service::availability::{CreateAvailabilityRequest, WindowInput};
use bookwell_service::reservation::BookingRequest;

/// Register and login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, max = 1024, message = "Password is required"))]
    pub password: String,
}

/// Create availability request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAvailabilityBody {
    /// Unique name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    /// Windows to create with it.
    #[serde(default)]
    pub windows: Vec<WindowInput>,
}

impl From<CreateAvailabilityBody> for CreateAvailabilityRequest {
    fn from(body: CreateAvailabilityBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            windows: body.windows,
        }
    }
}

/// Create reservation request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReservationBody {
    /// Target window.
    pub window_id: Uuid,
    /// Requested start (inclusive).
    pub start_time: DateTime<Utc>,
    /// Requested end (exclusive).
    pub end_time: DateTime<Utc>,
    /// Message for the provider.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub message: String,
}

impl From<CreateReservationBody> for BookingRequest {
    fn from(body: CreateReservationBody) -> Self {
        Self {
            window_id: body.window_id,
            start_time: body.start_time,
            end_time: body.end_time,
            message: body.message,
        }
    }
}
