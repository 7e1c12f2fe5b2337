//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seeded role tags. Roles are not user-created.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Default role for self-registered users.
    #[default]
    Student,
    /// Publishes availabilities.
    Teacher,
    /// Operates the system.
    Administrator,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Administrator => "administrator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = bookwell_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "administrator" => Ok(Self::Administrator),
            _ => Err(bookwell_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: student, teacher, administrator"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_student() {
        assert_eq!(UserRole::default(), UserRole::Student);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("teacher".parse::<UserRole>().unwrap(), UserRole::Teacher);
        assert_eq!(
            "ADMINISTRATOR".parse::<UserRole>().unwrap(),
            UserRole::Administrator
        );
        assert!("admin".parse::<UserRole>().is_err());
    }
}
