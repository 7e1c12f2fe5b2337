//! User lookup, registration and password verification.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use bookwell_core::error::AppError;
use bookwell_core::result::AppResult;
use bookwell_database::store::UserStore;
use bookwell_entity::user::{CreateUser, User, UserRole, normalize_email};

use crate::password::PasswordHasher;

/// Persists user identities and verifies passwords.
///
/// Hashes never leave this type; callers only learn whether a password
/// matched.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Creates a credential store over the given user store.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }

    /// Find a user by email, ignoring case and surrounding whitespace.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(&normalize_email(email)).await
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    /// Whether `plaintext` matches the user's stored password.
    pub async fn verify_password(&self, user: &User, plaintext: &str) -> AppResult<bool> {
        let hasher = self.hasher.clone();
        let hash = user.password_hash.clone();
        let plaintext = plaintext.to_string();
        tokio::task::spawn_blocking(move || hasher.verify_password(&plaintext, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }

    /// Register a new user with the default role.
    ///
    /// Fails with `DuplicateEmail` if the email is already registered.
    pub async fn create(&self, email: &str, plaintext: &str) -> AppResult<User> {
        let email = normalize_email(email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::duplicate_email(format!(
                "Email '{email}' is already registered"
            )));
        }

        let hasher = self.hasher.clone();
        let plaintext = plaintext.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash_password(&plaintext))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))??;

        let user = self
            .users
            .create(&CreateUser {
                email,
                password_hash,
                role: UserRole::default(),
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    /// Resolve an email and password to a user.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, plaintext: &str) -> AppResult<User> {
        let Some(user) = self.find_by_email(email).await? else {
            warn!(email = %normalize_email(email), "Login failed: unknown email");
            return Err(AppError::invalid_credentials("Invalid email or password"));
        };

        if !self.verify_password(&user, plaintext).await? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        Ok(user)
    }
}
