//! Convenience result type alias for Bookwell.

use crate::error::AppError;

/// A specialized `Result` type for Bookwell operations.
pub type AppResult<T> = Result<T, AppError>;
