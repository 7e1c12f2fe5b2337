//! Availability management.

pub mod service;

pub use service::{AvailabilityService, CreateAvailabilityRequest, WindowInput};
