//! PostgreSQL implementations of the store traits.

pub mod booking;
pub mod hierarchy;
pub mod revoked_token;
pub mod user;

pub use booking::PgBookingTransaction;
pub use hierarchy::HierarchyRepository;
pub use revoked_token::RevokedTokenRepository;
pub use user::UserRepository;

use bookwell_core::error::{AppError, ErrorKind};

/// The violated constraint, if `e` is a constraint violation.
pub(crate) fn violated_constraint(e: &sqlx::Error) -> Option<&str> {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

/// Wrap an sqlx error as an opaque database error.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
