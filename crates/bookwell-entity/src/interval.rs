//! Half-open time intervals.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Rejection reasons for an interval's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// `start` is equal to `end`.
    #[error("interval is empty: start equals end")]
    Empty,
    /// `start` is after `end`.
    #[error("interval is inverted: start is after end")]
    Inverted,
}

/// A non-empty half-open interval `[start, end)`.
///
/// Construction goes through [`Interval::new`], so `start < end` holds for
/// every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, rejecting empty and inverted spans.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, IntervalError> {
        if start == end {
            Err(IntervalError::Empty)
        } else if start > end {
            Err(IntervalError::Inverted)
        } else {
            Ok(Self { start, end })
        }
    }

    /// Inclusive start.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether the two intervals share any instant. Touching intervals do not.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
