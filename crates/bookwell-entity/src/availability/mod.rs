//! Availability and window entities.

pub mod model;

pub use model::{Availability, AvailabilityWithWindows, CreateAvailability, Window};
