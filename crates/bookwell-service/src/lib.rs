//! # bookwell-service
//!
//! Business logic for Bookwell. Services receive their stores and token
//! service by constructor injection and take a [`RequestContext`] naming
//! the authenticated caller.

pub mod account;
pub mod availability;
pub mod context;
pub mod reservation;

pub use account::AccountService;
pub use availability::AvailabilityService;
pub use context::RequestContext;
pub use reservation::{BookingEngine, ReservationService};
