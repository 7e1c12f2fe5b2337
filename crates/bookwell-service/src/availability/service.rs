//! Availability CRUD with ownership enforcement.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use bookwell_core::error::AppError;
use bookwell_database::store::HierarchyStore;
use bookwell_entity::availability::{AvailabilityWithWindows, CreateAvailability};
use bookwell_entity::interval::Interval;

use crate::context::RequestContext;

/// Manages availabilities and their windows.
#[derive(Clone)]
pub struct AvailabilityService {
    hierarchy: Arc<dyn HierarchyStore>,
}

impl std::fmt::Debug for AvailabilityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityService").finish_non_exhaustive()
    }
}

/// Request to publish a new availability.
#[derive(Debug, Clone)]
pub struct CreateAvailabilityRequest {
    /// Unique name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Windows to create with it.
    pub windows: Vec<WindowInput>,
}

/// An unvalidated window span.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindowInput {
    /// Window start (inclusive).
    pub start_time: DateTime<Utc>,
    /// Window end (exclusive).
    pub end_time: DateTime<Utc>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(hierarchy: Arc<dyn HierarchyStore>) -> Self {
        Self { hierarchy }
    }

    /// Lists every availability with its windows, oldest first.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
    ) -> Result<Vec<AvailabilityWithWindows>, AppError> {
        self.hierarchy.list_availabilities().await
    }

    /// Gets an availability with its windows.
    pub async fn get(
        &self,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<AvailabilityWithWindows, AppError> {
        self.hierarchy
            .find_availability_with_windows(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Availability {id} not found")))
    }

    /// Publishes an availability owned by the caller.
    ///
    /// Every window is validated before anything is written.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateAvailabilityRequest,
    ) -> Result<AvailabilityWithWindows, AppError> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Availability name must not be empty"));
        }

        let windows = validate_windows(&req.windows)?;

        let created = self
            .hierarchy
            .create_availability(&CreateAvailability {
                owner_id: ctx.user_id,
                name,
                description: req.description,
                windows,
            })
            .await?;

        info!(
            availability_id = %created.availability.id,
            owner_id = %ctx.user_id,
            windows = created.windows.len(),
            "Availability created"
        );
        Ok(created)
    }

    /// Deletes an availability and everything beneath it. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let availability = self
            .hierarchy
            .find_availability(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Availability {id} not found")))?;

        if !availability.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the owner may delete this availability",
            ));
        }

        // A concurrent delete by the owner may have won.
        if !self.hierarchy.delete_availability(id).await? {
            return Err(AppError::not_found(format!("Availability {id} not found")));
        }

        info!(availability_id = %id, owner_id = %ctx.user_id, "Availability deleted");
        Ok(())
    }

    /// Availabilities are replaced, never patched.
    pub async fn update(&self, _ctx: &RequestContext, _id: Uuid) -> Result<(), AppError> {
        Err(AppError::not_implemented(
            "Availabilities cannot be updated; delete and recreate instead",
        ))
    }
}

/// Turn raw spans into intervals, naming the first bad one.
fn validate_windows(windows: &[WindowInput]) -> Result<Vec<Interval>, AppError> {
    windows
        .iter()
        .enumerate()
        .map(|(index, w)| {
            Interval::new(w.start_time, w.end_time).map_err(|e| {
                AppError::invalid_window(format!("Window {index} is invalid: {e}"))
            })
        })
        .collect()
}
