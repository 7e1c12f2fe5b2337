//! Integration tests for registration, login and token handling.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_returns_token_and_default_role() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "Alice@Example.com", "password": "pw-alice" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["user"]["email"], "alice@example.com");
    assert_eq!(response.body["data"]["user"]["role"], "student");
    assert!(response.body["data"]["token"].as_str().is_some());
    assert!(response.body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = helpers::TestApp::new();
    app.register("dup@example.com", "pw").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "DUP@example.com", "password": "other" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("DUPLICATE_EMAIL"));
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "not-an-email", "password": "pw" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new();
    app.register("bob@example.com", "pw-bob").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "bob@example.com", "password": "pw-bob" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["token"].as_str().is_some());
    assert!(response.body["data"]["expires_at"].as_str().is_some());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_alike() {
    let app = helpers::TestApp::new();
    app.register("carol@example.com", "pw-carol").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "carol@example.com", "password": "nope" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_code(), Some("INVALID_CREDENTIALS"));
    assert_eq!(wrong_password.body, unknown.body);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/availabilities", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("MALFORMED_TOKEN"));
}

#[tokio::test]
async fn test_garbage_token_is_malformed() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/availabilities", None, Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("MALFORMED_TOKEN"));
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = helpers::TestApp::new();
    let user = app.register("dave@example.com", "pw-dave").await;

    let before = app
        .request("GET", "/api/availabilities", None, Some(&user.token))
        .await;
    assert_eq!(before.status, StatusCode::OK);

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&user.token))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let after = app
        .request("GET", "/api/availabilities", None, Some(&user.token))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after.error_code(), Some("REVOKED_TOKEN"));

    // A fresh login still works.
    let fresh = app.login("dave@example.com", "pw-dave").await;
    let again = app
        .request("GET", "/api/availabilities", None, Some(&fresh))
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_twice_is_rejected() {
    let app = helpers::TestApp::new();
    let user = app.register("erin@example.com", "pw-erin").await;

    app.request("POST", "/api/auth/logout", None, Some(&user.token))
        .await;
    let second = app
        .request("POST", "/api/auth/logout", None, Some(&user.token))
        .await;

    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.error_code(), Some("REVOKED_TOKEN"));
}

#[tokio::test]
async fn test_delete_account_revokes_token_and_frees_email() {
    let app = helpers::TestApp::new();
    let user = app.register("frank@example.com", "pw-frank").await;

    let response = app
        .request("DELETE", "/api/users/me", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app
        .request("GET", "/api/availabilities", None, Some(&user.token))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "frank@example.com", "password": "pw-frank" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    app.register("frank@example.com", "pw-frank-2").await;
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], "memory");
}
