//! Application builder: wires stores, services and router together.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use bookwell_auth::{RevocationList, TokenService};
use bookwell_core::config::AppConfig;
use bookwell_core::result::AppResult;
use bookwell_database::Stores;
use bookwell_service::{AccountService, AvailabilityService, BookingEngine, ReservationService};

use crate::router::build_router;
use crate::state::AppState;

/// Connects the configured stores and builds the application state.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let stores = Stores::connect(&config.database).await?;
    Ok(build_state_with_stores(config, stores))
}

/// Builds the application state on already-connected stores.
pub fn build_state_with_stores(config: AppConfig, stores: Stores) -> AppState {
    let revocations = RevocationList::new(
        stores.revocations.clone(),
        config.auth.revocation_cache_capacity,
    );
    let tokens = TokenService::from_config(&config.auth, revocations);

    let accounts = AccountService::new(stores.users.clone(), tokens.clone());
    let availabilities = AvailabilityService::new(stores.hierarchy.clone());
    let engine = BookingEngine::new(stores.hierarchy.clone(), stores.users.clone());
    let reservations = ReservationService::new(stores.hierarchy.clone(), engine);

    info!(
        backend = stores.backend(),
        token_ttl_minutes = config.auth.token_ttl_minutes,
        "Application state initialized"
    );

    AppState {
        config: Arc::new(config),
        stores,
        tokens: Arc::new(tokens),
        accounts: Arc::new(accounts),
        availabilities: Arc::new(availabilities),
        reservations: Arc::new(reservations),
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
