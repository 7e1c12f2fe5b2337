//! Store traits and backend selection.
//!
//! Services hold these as `Arc<dyn ...>` so the same business logic runs on
//! PostgreSQL in production and on the in-memory backend in tests.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use bookwell_core::config::DatabaseConfig;
use bookwell_core::error::AppError;
use bookwell_core::result::AppResult;
use bookwell_entity::availability::{
    Availability, AvailabilityWithWindows, CreateAvailability, Window,
};
use bookwell_entity::reservation::{CreateReservation, Reservation, ReservationDetail};
use bookwell_entity::user::{CreateUser, User};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{HierarchyRepository, RevokedTokenRepository, UserRepository};

/// Persistence for user identities.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user. Fails with `DuplicateEmail` if the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Delete a user together with every availability they own (and its
    /// windows and reservations) and every reservation they booked.
    ///
    /// Returns `false` if the user did not exist.
    async fn delete_cascade(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence for the availability -> window -> reservation tree.
#[async_trait]
pub trait HierarchyStore: Send + Sync + 'static {
    /// All availabilities with their windows, oldest first.
    async fn list_availabilities(&self) -> AppResult<Vec<AvailabilityWithWindows>>;

    /// Fetch an availability without its windows.
    async fn find_availability(&self, id: Uuid) -> AppResult<Option<Availability>>;

    /// Fetch an availability with its windows.
    async fn find_availability_with_windows(
        &self,
        id: Uuid,
    ) -> AppResult<Option<AvailabilityWithWindows>>;

    /// Insert an availability and all of its windows atomically.
    ///
    /// Fails with `DuplicateName` if the name is taken.
    async fn create_availability(
        &self,
        data: &CreateAvailability,
    ) -> AppResult<AvailabilityWithWindows>;

    /// Delete an availability, its windows and their reservations atomically.
    ///
    /// Returns `false` if the availability did not exist.
    async fn delete_availability(&self, id: Uuid) -> AppResult<bool>;

    /// Fetch a single window.
    async fn find_window(&self, id: Uuid) -> AppResult<Option<Window>>;

    /// A booker's reservations with window and availability summaries,
    /// latest start first.
    async fn list_reservations_for_booker(
        &self,
        booker_id: Uuid,
    ) -> AppResult<Vec<ReservationDetail>>;

    /// Open a unit of work that has exclusive booking access to one window.
    ///
    /// Returns `None` if the window does not exist. Other booking units on
    /// the same window wait until this one is committed or dropped.
    async fn begin_booking(&self, window_id: Uuid)
    -> AppResult<Option<Box<dyn BookingTransaction>>>;
}

/// A per-window read-check-write unit of work.
///
/// Dropping it without calling [`BookingTransaction::commit`] discards it
/// and releases the window.
#[async_trait]
pub trait BookingTransaction: Send {
    /// The locked window.
    fn window(&self) -> &Window;

    /// The window's reservations, ordered by start time ascending.
    fn reservations(&self) -> &[Reservation];

    /// Insert the reservation and release the window.
    async fn commit(self: Box<Self>, data: &CreateReservation) -> AppResult<Reservation>;
}

/// The append-only set of revoked bearer tokens.
#[async_trait]
pub trait RevocationStore: Send + Sync + 'static {
    /// Whether this exact token string has been revoked.
    async fn is_revoked(&self, token: &str) -> AppResult<bool>;

    /// Record the token. Returns `true` if it was not already present.
    async fn revoke(&self, token: &str) -> AppResult<bool>;
}

/// The set of stores backing one running application.
#[derive(Clone)]
pub struct Stores {
    /// User identities.
    pub users: Arc<dyn UserStore>,
    /// Availability tree.
    pub hierarchy: Arc<dyn HierarchyStore>,
    /// Revoked tokens.
    pub revocations: Arc<dyn RevocationStore>,
    pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("backend", &self.backend())
            .finish()
    }
}

impl Stores {
    /// Build the stores selected by `config.backend`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend.as_str() {
            "postgres" => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Using in-memory store");
                Ok(Self::memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database backend: '{other}'. Expected one of: postgres, memory"
            ))),
        }
    }

    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg: PgPool = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            hierarchy: Arc::new(HierarchyRepository::new(pg.clone())),
            revocations: Arc::new(RevokedTokenRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Stores backed by a fresh in-process [`MemoryStore`].
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            hierarchy: store.clone(),
            revocations: store,
            pool: None,
        }
    }

    /// Name of the active backend.
    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
