//! Unified application error types for Bookwell.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Each [`ErrorKind`] names one specific
//! failure reason, and belongs to exactly one [`ErrorCategory`].

use std::fmt;
use thiserror::Error;

/// Broad error families. The HTTP layer maps these to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCategory {
    /// The bearer token or credentials could not identify a user.
    Authentication,
    /// The token is valid but the subject lacks rights over the target.
    Authorization,
    /// The request was rejected before any mutation.
    Validation,
    /// The request was well-formed but collided with existing state.
    Conflict,
    /// A referenced entity does not exist.
    NotFound,
    /// The operation is not supported.
    NotImplemented,
    /// Unexpected failure; details stay in the logs.
    Internal,
}

/// Specific failure reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The token could not be parsed or its signature did not verify.
    Malformed,
    /// The token is past its expiry time.
    Expired,
    /// The token was explicitly revoked by logout.
    Revoked,
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// The subject may not act on the target resource.
    Forbidden,
    /// A window has `start >= end`.
    InvalidWindow,
    /// A reservation interval is not contained in its window.
    OutOfBounds,
    /// A reservation interval has `start >= end`.
    InvalidInterval,
    /// Any other malformed input.
    Validation,
    /// The requested interval overlaps an existing reservation.
    Conflict,
    /// The email is already registered.
    DuplicateEmail,
    /// The availability name is already taken.
    DuplicateName,
    /// The referenced entity does not exist.
    NotFound,
    /// The requested operation is not supported.
    NotImplemented,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// The family this kind belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Malformed | Self::Expired | Self::Revoked | Self::InvalidCredentials => {
                ErrorCategory::Authentication
            }
            Self::Forbidden => ErrorCategory::Authorization,
            Self::InvalidWindow | Self::OutOfBounds | Self::InvalidInterval | Self::Validation => {
                ErrorCategory::Validation
            }
            Self::Conflict | Self::DuplicateEmail | Self::DuplicateName => ErrorCategory::Conflict,
            Self::NotFound => ErrorCategory::NotFound,
            Self::NotImplemented => ErrorCategory::NotImplemented,
            Self::Database | Self::Configuration | Self::Internal => ErrorCategory::Internal,
        }
    }

    /// Machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed => "MALFORMED_TOKEN",
            Self::Expired => "EXPIRED_TOKEN",
            Self::Revoked => "REVOKED_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidWindow => "INVALID_WINDOW",
            Self::OutOfBounds => "OUT_OF_BOUNDS",
            Self::InvalidInterval => "INVALID_INTERVAL",
            Self::Validation => "VALIDATION_ERROR",
            Self::Conflict => "CONFLICT",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::NotFound => "NOT_FOUND",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::Database => "DATABASE_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unified application error used throughout Bookwell.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The specific failure reason.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The family of this error.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Create a malformed-token error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Malformed, message)
    }

    /// Create an expired-token error.
    pub fn expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Expired, message)
    }

    /// Create a revoked-token error.
    pub fn revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Revoked, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create an invalid-window error.
    pub fn invalid_window(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidWindow, message)
    }

    /// Create an out-of-bounds error.
    pub fn out_of_bounds(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfBounds, message)
    }

    /// Create an invalid-interval error.
    pub fn invalid_interval(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInterval, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a booking conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a duplicate-email error.
    pub fn duplicate_email(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateEmail, message)
    }

    /// Create a duplicate-name error.
    pub fn duplicate_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateName, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a not-implemented error.
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
