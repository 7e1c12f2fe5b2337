//! Reservations: the conflict checker, the booking engine and queries.

pub mod conflict;
pub mod engine;
pub mod service;

pub use conflict::{admits, first_conflict};
pub use engine::{BookingEngine, BookingRequest, BookingStage};
pub use service::ReservationService;
