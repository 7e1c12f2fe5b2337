//! Route definitions for the Bookwell HTTP API.
//!
//! All routes are mounted under `/api` and receive `AppState` through
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(availability_routes())
        .merge(reservation_routes())
        .merge(user_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Registration, login, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// Availability CRUD
fn availability_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/availabilities",
            get(handlers::availability::list_availabilities)
                .post(handlers::availability::create_availability),
        )
        .route(
            "/availabilities/{id}",
            get(handlers::availability::get_availability)
                .put(handlers::availability::update_availability)
                .delete(handlers::availability::delete_availability),
        )
}

/// Own reservations and booking
fn reservation_routes() -> Router<AppState> {
    Router::new().route(
        "/reservations",
        get(handlers::reservation::list_reservations)
            .post(handlers::reservation::create_reservation),
    )
}

/// Account self-service
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/me", delete(handlers::user::delete_me))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
