//! Account lifecycle: register, login, logout, delete.

use std::sync::Arc;

use tracing::info;

use bookwell_auth::{CredentialStore, IssuedToken, TokenService};
use bookwell_core::error::AppError;
use bookwell_database::store::UserStore;
use bookwell_entity::user::User;

use crate::context::RequestContext;

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The user.
    pub user: User,
    /// Their new token.
    pub token: IssuedToken,
}

/// Manages user accounts and their tokens.
#[derive(Clone)]
pub struct AccountService {
    credentials: CredentialStore,
    tokens: TokenService,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self {
            credentials: CredentialStore::new(users.clone()),
            tokens,
            users,
        }
    }

    /// Registers a new user and signs them in.
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let user = self.credentials.create(email, password).await?;
        let token = self.tokens.issue(user.id)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let user = self.credentials.authenticate(email, password).await?;
        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "User logged in");
        Ok(AuthenticatedUser { user, token })
    }

    /// Revokes the caller's presented token.
    pub async fn logout(&self, ctx: &RequestContext, token: &str) -> Result<(), AppError> {
        self.tokens.revoke(token).await?;
        info!(user_id = %ctx.user_id, "User logged out");
        Ok(())
    }

    /// Deletes the caller with everything they own or booked, then revokes
    /// the presented token.
    pub async fn delete_account(&self, ctx: &RequestContext, token: &str) -> Result<(), AppError> {
        if !self.users.delete_cascade(ctx.user_id).await? {
            return Err(AppError::not_found(format!("User {} not found", ctx.user_id)));
        }
        self.tokens.revoke(token).await?;
        info!(user_id = %ctx.user_id, "Account deleted");
        Ok(())
    }
}
