//! Reservation entities.

pub mod model;

pub use model::{CreateReservation, Reservation, ReservationDetail};
