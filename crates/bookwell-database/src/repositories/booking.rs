//! Row-locked booking unit of work.

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

use bookwell_core::error::AppError;
use bookwell_core::result::AppResult;
use bookwell_entity::availability::Window;
use bookwell_entity::reservation::{CreateReservation, Reservation};

use super::db_error;
use crate::store::BookingTransaction;

/// A transaction holding `FOR UPDATE` on one window row.
///
/// Dropping it rolls the transaction back.
pub struct PgBookingTransaction {
    tx: Transaction<'static, Postgres>,
    window: Window,
    reservations: Vec<Reservation>,
}

impl PgBookingTransaction {
    pub(crate) fn new(
        tx: Transaction<'static, Postgres>,
        window: Window,
        reservations: Vec<Reservation>,
    ) -> Self {
        Self {
            tx,
            window,
            reservations,
        }
    }
}

#[async_trait]
impl BookingTransaction for PgBookingTransaction {
    fn window(&self) -> &Window {
        &self.window
    }

    fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    async fn commit(self: Box<Self>, data: &CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.tx;

        let reservation = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (window_id, booker_id, message, start_time, end_time) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.window_id)
        .bind(data.booker_id)
        .bind(&data.message)
        .bind(data.interval.start())
        .bind(data.interval.end())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("reservations_booker_id_fkey") =>
            {
                AppError::forbidden("Booking user no longer exists")
            }
            _ => db_error("Failed to create reservation")(e),
        })?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit reservation"))?;

        Ok(reservation)
    }
}
