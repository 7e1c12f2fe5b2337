//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use bookwell_core::error::AppError;
use bookwell_core::result::AppResult;
use bookwell_entity::user::{CreateUser, User};

use super::db_error;
use crate::store::UserStore;

/// Repository for user rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::duplicate_email(format!("Email '{}' is already registered", data.email))
            }
            _ => db_error("Failed to create user")(e),
        })
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Lock the user's windows so in-flight bookings finish first.
        sqlx::query(
            "SELECT w.id FROM windows w \
             JOIN availabilities a ON a.id = w.availability_id \
             WHERE a.owner_id = $1 FOR UPDATE OF w",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to lock windows"))?;

        sqlx::query(
            "DELETE FROM reservations WHERE booker_id = $1 OR window_id IN ( \
                 SELECT w.id FROM windows w \
                 JOIN availabilities a ON a.id = w.availability_id \
                 WHERE a.owner_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to delete reservations"))?;

        sqlx::query(
            "DELETE FROM windows WHERE availability_id IN ( \
                 SELECT id FROM availabilities WHERE owner_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to delete windows"))?;

        sqlx::query("DELETE FROM availabilities WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete availabilities"))?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete user"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit user deletion"))?;

        Ok(result.rows_affected() > 0)
    }
}
