//! # bookwell-core
//!
//! Core crate for Bookwell. Contains the configuration schemas and the
//! unified error system shared by every other crate.
//!
//! This crate has **no** internal dependencies on other Bookwell crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorCategory, ErrorKind};
pub use result::AppResult;
