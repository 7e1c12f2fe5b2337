//! Reservation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::interval::{Interval, IntervalError};

/// A booked sub-interval of a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: Uuid,
    /// The window this reservation occupies.
    pub window_id: Uuid,
    /// The booking user.
    pub booker_id: Uuid,
    /// Message left by the booker.
    pub message: String,
    /// Inclusive start.
    pub start_time: DateTime<Utc>,
    /// Exclusive end.
    pub end_time: DateTime<Utc>,
    /// When the reservation was committed.
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// The booked span as an interval.
    pub fn interval(&self) -> Result<Interval, IntervalError> {
        Interval::new(self.start_time, self.end_time)
    }
}

/// Data required to commit a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    /// Target window.
    pub window_id: Uuid,
    /// The booking user.
    pub booker_id: Uuid,
    /// Requested span.
    pub interval: Interval,
    /// Message left by the booker.
    pub message: String,
}

/// A reservation joined with its booker, window and availability.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationDetail {
    pub id: Uuid,
    pub message: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub booker_id: Uuid,
    pub booker_email: String,
    pub window_id: Uuid,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub availability_id: Uuid,
    pub availability_name: String,
}
