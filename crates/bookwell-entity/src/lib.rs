//! # bookwell-entity
//!
//! Domain entity models for Bookwell. Structs that mirror a table row derive
//! `sqlx::FromRow`; everything else is a plain value object.

pub mod availability;
pub mod interval;
pub mod reservation;
pub mod token;
pub mod user;

pub use interval::{Interval, IntervalError};
