//! Reservation queries and creation.

use std::sync::Arc;

use bookwell_core::error::AppError;
use bookwell_database::store::HierarchyStore;
use bookwell_entity::reservation::{Reservation, ReservationDetail};

use super::engine::{BookingEngine, BookingRequest};
use crate::context::RequestContext;

/// Manages a booker's reservations.
#[derive(Clone)]
pub struct ReservationService {
    hierarchy: Arc<dyn HierarchyStore>,
    engine: BookingEngine,
}

impl std::fmt::Debug for ReservationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationService")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(hierarchy: Arc<dyn HierarchyStore>, engine: BookingEngine) -> Self {
        Self { hierarchy, engine }
    }

    /// Lists the caller's own reservations, latest start first.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<ReservationDetail>, AppError> {
        self.hierarchy.list_reservations_for_booker(ctx.user_id).await
    }

    /// Books part of a window for the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: BookingRequest,
    ) -> Result<Reservation, AppError> {
        self.engine.book(ctx, req).await
    }
}
