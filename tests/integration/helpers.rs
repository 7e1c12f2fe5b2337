//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use bookwell_core::config::{AppConfig, DatabaseConfig};
use bookwell_database::Stores;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

/// A registered user with a live token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory store.
    pub fn new() -> Self {
        let config = AppConfig {
            database: DatabaseConfig::memory(),
            ..AppConfig::default()
        };
        let state = bookwell_api::build_state_with_stores(config, Stores::memory());
        Self {
            router: bookwell_api::build_app(state),
        }
    }

    /// Register a user and return their id and token.
    pub async fn register(&self, email: &str, password: &str) -> TestUser {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );

        TestUser {
            id: response.body["data"]["user"]["id"]
                .as_str()
                .expect("No user id in register response")
                .to_string(),
            email: email.to_string(),
            token: response.body["data"]["token"]
                .as_str()
                .expect("No token in register response")
                .to_string(),
        }
    }

    /// Login and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Publish an availability with the given `(start, end)` windows.
    pub async fn create_availability(
        &self,
        token: &str,
        name: &str,
        windows: &[(&str, &str)],
    ) -> TestResponse {
        let windows: Vec<Value> = windows
            .iter()
            .map(|(start, end)| json!({ "start_time": start, "end_time": end }))
            .collect();

        self.request(
            "POST",
            "/api/availabilities",
            Some(json!({
                "name": name,
                "description": format!("{name} description"),
                "windows": windows,
            })),
            Some(token),
        )
        .await
    }

    /// Publish an availability with one window and return that window's id.
    pub async fn single_window(&self, token: &str, name: &str, start: &str, end: &str) -> String {
        let response = self.create_availability(token, name, &[(start, end)]).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create availability failed: {:?}",
            response.body
        );
        response.body["data"]["windows"][0]["id"]
            .as_str()
            .expect("No window id in response")
            .to_string()
    }

    /// Try to book `[start, end)` of a window.
    pub async fn book(&self, token: &str, window_id: &str, start: &str, end: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/reservations",
            Some(json!({
                "window_id": window_id,
                "start_time": start,
                "end_time": end,
                "message": "see you then",
            })),
            Some(token),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.raw_request(method, path, body_str, token).await
    }

    /// Make an HTTP request with a raw body.
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The machine-readable error code, if this is an error body.
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}
