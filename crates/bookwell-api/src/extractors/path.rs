//! `AvailabilityId` extractor for `/{id}` routes.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use bookwell_core::error::AppError;

use crate::error::ApiError;

/// An availability id taken from the route, rejected as a validation error
/// when it is not a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityId(pub Uuid);

impl AvailabilityId {
    fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AppError::validation(format!("Invalid availability id: {raw}")))
    }
}

impl<S> FromRequestParts<S> for AvailabilityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        Ok(Self::parse(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookwell_core::ErrorKind;

    #[test]
    fn test_parse_accepts_hyphenated_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(
            AvailabilityId::parse(&id.to_string()).unwrap(),
            AvailabilityId(id)
        );
    }

    #[test]
    fn test_parse_rejects_garbage_with_validation_error() {
        let err = AvailabilityId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Invalid availability id: not-a-uuid");
    }
}
