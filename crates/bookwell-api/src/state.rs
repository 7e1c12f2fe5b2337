//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bookwell_auth::TokenService;
use bookwell_core::config::AppConfig;
use bookwell_database::Stores;
use bookwell_service::{AccountService, AvailabilityService, ReservationService};

/// Application state containing all shared dependencies.
///
/// Passed to every handler via `State<AppState>`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Backing stores
    pub stores: Stores,
    /// Bearer token issuance and validation
    pub tokens: Arc<TokenService>,
    /// Registration, login, logout, account deletion
    pub accounts: Arc<AccountService>,
    /// Availability management
    pub availabilities: Arc<AvailabilityService>,
    /// Reservation listing and booking
    pub reservations: Arc<ReservationService>,
}
