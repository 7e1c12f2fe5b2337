//! Availability, window and reservation queries.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use bookwell_core::error::AppError;
use bookwell_core::result::AppResult;
use bookwell_entity::availability::{
    Availability, AvailabilityWithWindows, CreateAvailability, Window,
};
use bookwell_entity::reservation::{Reservation, ReservationDetail};

use super::booking::PgBookingTransaction;
use super::{db_error, violated_constraint};
use crate::store::{BookingTransaction, HierarchyStore};

/// Repository for the availability tree.
#[derive(Debug, Clone)]
pub struct HierarchyRepository {
    pool: PgPool,
}

impl HierarchyRepository {
    /// Create a new hierarchy repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn windows_for(&self, availability_ids: &[Uuid]) -> AppResult<Vec<Window>> {
        sqlx::query_as::<_, Window>(
            "SELECT * FROM windows WHERE availability_id = ANY($1) ORDER BY start_time DESC",
        )
        .bind(availability_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list windows"))
    }
}

#[async_trait]
impl HierarchyStore for HierarchyRepository {
    async fn list_availabilities(&self) -> AppResult<Vec<AvailabilityWithWindows>> {
        let availabilities = sqlx::query_as::<_, Availability>(
            "SELECT * FROM availabilities ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list availabilities"))?;

        let ids: Vec<Uuid> = availabilities.iter().map(|a| a.id).collect();
        let mut grouped: HashMap<Uuid, Vec<Window>> = HashMap::new();
        for window in self.windows_for(&ids).await? {
            grouped
                .entry(window.availability_id)
                .or_default()
                .push(window);
        }

        Ok(availabilities
            .into_iter()
            .map(|a| {
                let windows = grouped.remove(&a.id).unwrap_or_default();
                AvailabilityWithWindows::new(a, windows)
            })
            .collect())
    }

    async fn find_availability(&self, id: Uuid) -> AppResult<Option<Availability>> {
        sqlx::query_as::<_, Availability>("SELECT * FROM availabilities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find availability"))
    }

    async fn find_availability_with_windows(
        &self,
        id: Uuid,
    ) -> AppResult<Option<AvailabilityWithWindows>> {
        let Some(availability) = self.find_availability(id).await? else {
            return Ok(None);
        };
        let windows = self.windows_for(&[id]).await?;
        Ok(Some(AvailabilityWithWindows::new(availability, windows)))
    }

    async fn create_availability(
        &self,
        data: &CreateAvailability,
    ) -> AppResult<AvailabilityWithWindows> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let availability = sqlx::query_as::<_, Availability>(
            "INSERT INTO availabilities (name, description, owner_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            violated_constraint(&e)
                .and_then(|c| availability_constraint_error(c, &data.name))
                .unwrap_or_else(|| db_error("Failed to create availability")(e))
        })?;

        let mut windows = Vec::with_capacity(data.windows.len());
        for interval in &data.windows {
            let window = sqlx::query_as::<_, Window>(
                "INSERT INTO windows (availability_id, start_time, end_time) \
                 VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(availability.id)
            .bind(interval.start())
            .bind(interval.end())
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to create window"))?;
            windows.push(window);
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit availability"))?;

        Ok(AvailabilityWithWindows::new(availability, windows))
    }

    async fn delete_availability(&self, id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Wait for bookings holding any of these windows.
        sqlx::query("SELECT id FROM windows WHERE availability_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to lock windows"))?;

        sqlx::query(
            "DELETE FROM reservations WHERE window_id IN ( \
                 SELECT id FROM windows WHERE availability_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to delete reservations"))?;

        sqlx::query("DELETE FROM windows WHERE availability_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete windows"))?;

        let result = sqlx::query("DELETE FROM availabilities WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete availability"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit availability deletion"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_window(&self, id: Uuid) -> AppResult<Option<Window>> {
        sqlx::query_as::<_, Window>("SELECT * FROM windows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find window"))
    }

    async fn list_reservations_for_booker(
        &self,
        booker_id: Uuid,
    ) -> AppResult<Vec<ReservationDetail>> {
        sqlx::query_as::<_, ReservationDetail>(
            "SELECT r.id, r.message, r.start_time, r.end_time, r.created_at, \
                    r.booker_id, u.email AS booker_email, \
                    r.window_id, w.start_time AS window_start, w.end_time AS window_end, \
                    a.id AS availability_id, a.name AS availability_name \
             FROM reservations r \
             JOIN users u ON u.id = r.booker_id \
             JOIN windows w ON w.id = r.window_id \
             JOIN availabilities a ON a.id = w.availability_id \
             WHERE r.booker_id = $1 \
             ORDER BY r.start_time DESC",
        )
        .bind(booker_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list reservations"))
    }

    async fn begin_booking(
        &self,
        window_id: Uuid,
    ) -> AppResult<Option<Box<dyn BookingTransaction>>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let Some(window) =
            sqlx::query_as::<_, Window>("SELECT * FROM windows WHERE id = $1 FOR UPDATE")
                .bind(window_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Failed to lock window"))?
        else {
            return Ok(None);
        };

        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE window_id = $1 ORDER BY start_time ASC",
        )
        .bind(window_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("Failed to load reservations"))?;

        Ok(Some(Box::new(PgBookingTransaction::new(
            tx,
            window,
            reservations,
        ))))
    }
}

/// Domain error for a constraint the availability insert can violate.
fn availability_constraint_error(constraint: &str, name: &str) -> Option<AppError> {
    match constraint {
        "availabilities_name_key" => Some(AppError::duplicate_name(format!(
            "Availability '{name}' already exists"
        ))),
        // The owner was deleted after their token was validated.
        "availabilities_owner_id_fkey" => Some(AppError::forbidden("Owner no longer exists")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookwell_core::ErrorKind;

    #[test]
    fn test_insert_constraints_map_to_domain_errors() {
        let dup = availability_constraint_error("availabilities_name_key", "Lab").unwrap();
        assert_eq!(dup.kind, ErrorKind::DuplicateName);
        assert!(dup.message.contains("Lab"));

        let orphan = availability_constraint_error("availabilities_owner_id_fkey", "Lab").unwrap();
        assert_eq!(orphan.kind, ErrorKind::Forbidden);

        assert!(availability_constraint_error("windows_interval_check", "Lab").is_none());
    }
}
