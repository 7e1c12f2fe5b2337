//! Availability and window entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::interval::{Interval, IntervalError};

/// A provider's named offering.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Availability {
    /// Unique availability identifier.
    pub id: Uuid,
    /// Globally unique display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// The providing user.
    pub owner_id: Uuid,
    /// When the availability was created.
    pub created_at: DateTime<Utc>,
}

impl Availability {
    /// Check if the given user owns this availability.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// A contiguous bookable span inside an availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Window {
    /// Unique window identifier.
    pub id: Uuid,
    /// Parent availability.
    pub availability_id: Uuid,
    /// Inclusive start.
    pub start_time: DateTime<Utc>,
    /// Exclusive end.
    pub end_time: DateTime<Utc>,
}

impl Window {
    /// The window's span as an interval.
    ///
    /// Stored windows always satisfy `start_time < end_time`; an error here
    /// means the row was written outside the application.
    pub fn interval(&self) -> Result<Interval, IntervalError> {
        Interval::new(self.start_time, self.end_time)
    }
}

/// An availability fetched together with its windows, latest start first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityWithWindows {
    /// The availability row.
    #[serde(flatten)]
    pub availability: Availability,
    /// Child windows ordered by start time, descending.
    pub windows: Vec<Window>,
}

impl AvailabilityWithWindows {
    /// Attach windows, enforcing the descending start-time order.
    pub fn new(availability: Availability, mut windows: Vec<Window>) -> Self {
        windows.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Self {
            availability,
            windows,
        }
    }
}

/// Data required to create an availability and its windows in one step.
#[derive(Debug, Clone)]
pub struct CreateAvailability {
    /// The providing user.
    pub owner_id: Uuid,
    /// Desired unique name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Already-validated window spans.
    pub windows: Vec<Interval>,
}
