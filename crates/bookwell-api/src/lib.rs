//! # bookwell-api
//!
//! HTTP API layer for Bookwell built on Axum.
//!
//! Provides the REST endpoints, middleware (request logging, CORS),
//! extractors (bearer authentication, validated JSON), DTOs, and the mapping
//! from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, build_state_with_stores};
pub use state::AppState;
