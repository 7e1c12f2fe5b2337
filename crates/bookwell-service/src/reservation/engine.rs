//! The booking engine.
//!
//! A reservation request moves through fixed stages:
//!
//! ```text
//! Authenticating -> Authorizing -> ValidatingBounds -> CheckingConflict -> Committing
//! ```
//!
//! Authentication happens before the engine is called, when the bearer token
//! is resolved into a [`RequestContext`]. The first failing stage ends the
//! request with that stage's error; later stages are never attempted.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use bookwell_core::error::AppError;
use bookwell_core::result::AppResult;
use bookwell_database::store::{HierarchyStore, UserStore};
use bookwell_entity::interval::{Interval, IntervalError};
use bookwell_entity::reservation::{CreateReservation, Reservation};

use super::conflict::first_conflict;
use crate::context::RequestContext;

/// A stage of the booking pipeline that can reject a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    /// The caller must still exist as a user.
    Authorizing,
    /// The interval must be well-formed and lie inside an existing window.
    ValidatingBounds,
    /// The interval must not overlap the window's reservations.
    CheckingConflict,
    /// The reservation is written.
    Committing,
}

impl BookingStage {
    /// Lowercase stage name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorizing => "authorizing",
            Self::ValidatingBounds => "validating_bounds",
            Self::CheckingConflict => "checking_conflict",
            Self::Committing => "committing",
        }
    }
}

impl fmt::Display for BookingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to book part of a window.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Target window.
    pub window_id: Uuid,
    /// Requested start (inclusive).
    pub start_time: DateTime<Utc>,
    /// Requested end (exclusive).
    pub end_time: DateTime<Utc>,
    /// Message for the provider.
    pub message: String,
}

type StageResult<T> = Result<T, (BookingStage, AppError)>;

fn at<T>(stage: BookingStage, result: AppResult<T>) -> StageResult<T> {
    result.map_err(|e| (stage, e))
}

/// Orchestrates reservation creation with per-window serialization.
#[derive(Clone)]
pub struct BookingEngine {
    hierarchy: Arc<dyn HierarchyStore>,
    users: Arc<dyn UserStore>,
}

impl fmt::Debug for BookingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingEngine").finish_non_exhaustive()
    }
}

impl BookingEngine {
    /// Creates a booking engine over the given stores.
    pub fn new(hierarchy: Arc<dyn HierarchyStore>, users: Arc<dyn UserStore>) -> Self {
        Self { hierarchy, users }
    }

    /// Run a booking request through every stage.
    pub async fn book(&self, ctx: &RequestContext, req: BookingRequest) -> AppResult<Reservation> {
        match self.run(ctx, req).await {
            Ok(reservation) => {
                info!(
                    reservation_id = %reservation.id,
                    window_id = %reservation.window_id,
                    booker_id = %ctx.user_id,
                    "Reservation created"
                );
                Ok(reservation)
            }
            Err((stage, err)) => {
                warn!(
                    stage = %stage,
                    booker_id = %ctx.user_id,
                    kind = %err.kind,
                    "Booking rejected: {}",
                    err.message
                );
                Err(err)
            }
        }
    }

    async fn run(&self, ctx: &RequestContext, req: BookingRequest) -> StageResult<Reservation> {
        use BookingStage::*;

        // Any existing user may book any window.
        let booker = at(Authorizing, self.users.find_by_id(ctx.user_id).await)?;
        if booker.is_none() {
            return Err((Authorizing, AppError::forbidden("Booking user no longer exists")));
        }

        let interval = at(ValidatingBounds, requested_interval(&req))?;
        let window = at(ValidatingBounds, self.hierarchy.find_window(req.window_id).await)?
            .ok_or_else(|| (ValidatingBounds, window_not_found(req.window_id)))?;
        // Window spans never change after creation, so this needs no lock.
        let bounds = at(ValidatingBounds, stored_interval(window.interval()))?;
        if !bounds.contains(&interval) {
            return Err((
                ValidatingBounds,
                AppError::out_of_bounds(format!(
                    "Requested [{}, {}) is outside window [{}, {})",
                    interval.start(),
                    interval.end(),
                    bounds.start(),
                    bounds.end()
                )),
            ));
        }

        // Held until commit or drop; serializes bookings on this window.
        let tx = at(
            CheckingConflict,
            self.hierarchy.begin_booking(req.window_id).await,
        )?
        .ok_or_else(|| (CheckingConflict, window_not_found(req.window_id)))?;

        let existing = at(
            CheckingConflict,
            tx.reservations()
                .iter()
                .map(|r| stored_interval(r.interval()))
                .collect::<AppResult<Vec<_>>>(),
        )?;
        if let Some(hit) = first_conflict(&interval, &existing) {
            return Err((
                CheckingConflict,
                AppError::conflict(format!(
                    "Requested [{}, {}) overlaps existing reservation [{}, {})",
                    interval.start(),
                    interval.end(),
                    hit.start(),
                    hit.end()
                )),
            ));
        }

        let data = CreateReservation {
            window_id: req.window_id,
            booker_id: ctx.user_id,
            interval,
            message: req.message,
        };
        at(Committing, tx.commit(&data).await)
    }
}

fn requested_interval(req: &BookingRequest) -> AppResult<Interval> {
    Interval::new(req.start_time, req.end_time).map_err(|e| {
        AppError::invalid_interval(format!("Reservation start must be before its end: {e}"))
    })
}

fn stored_interval(result: Result<Interval, IntervalError>) -> AppResult<Interval> {
    result.map_err(|e| AppError::internal(format!("Stored interval is invalid: {e}")))
}

fn window_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Window {id} not found"))
}
