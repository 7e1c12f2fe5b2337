//! Integration tests for availability management.

mod helpers;

use http::StatusCode;
use serde_json::json;

const DAY_START: &str = "2030-03-04T09:00:00Z";
const DAY_NOON: &str = "2030-03-04T12:00:00Z";

#[tokio::test]
async fn test_create_and_get_availability() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;

    let created = app
        .create_availability(
            &alice.token,
            "Office hours",
            &[
                (DAY_START, DAY_NOON),
                ("2030-03-05T09:00:00Z", "2030-03-05T10:00:00Z"),
            ],
        )
        .await;

    assert_eq!(created.status, StatusCode::CREATED);
    let data = &created.body["data"];
    assert_eq!(data["name"], "Office hours");
    assert_eq!(data["owner_id"], alice.id.as_str());

    // Latest start first.
    let windows = data["windows"].as_array().expect("windows array");
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["start_time"], "2030-03-05T09:00:00Z");
    assert_eq!(windows[1]["start_time"], DAY_START);

    let id = data["id"].as_str().expect("availability id");
    let fetched = app
        .request(
            "GET",
            &format!("/api/availabilities/{id}"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["windows"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_list_is_visible_to_everyone_oldest_first() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;

    app.single_window(&alice.token, "First", DAY_START, DAY_NOON)
        .await;
    app.single_window(&bob.token, "Second", DAY_START, DAY_NOON)
        .await;

    let listed = app
        .request("GET", "/api/availabilities", None, Some(&bob.token))
        .await;

    assert_eq!(listed.status, StatusCode::OK);
    let names: Vec<&str> = listed.body["data"]
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|a| a["name"].as_str())
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;

    app.single_window(&alice.token, "Lab", DAY_START, DAY_NOON)
        .await;
    let response = app
        .create_availability(&bob.token, "Lab", &[(DAY_START, DAY_NOON)])
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("DUPLICATE_NAME"));
}

#[tokio::test]
async fn test_invalid_window_rejects_whole_availability() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;

    let response = app
        .create_availability(
            &alice.token,
            "Broken",
            &[(DAY_START, DAY_NOON), (DAY_NOON, DAY_NOON)],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_WINDOW"));

    let listed = app
        .request("GET", "/api/availabilities", None, Some(&alice.token))
        .await;
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_missing_name_is_validation_error() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;

    let response = app
        .request(
            "POST",
            "/api/availabilities",
            Some(json!({ "name": "", "windows": [] })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;

    let response = app
        .raw_request(
            "POST",
            "/api/availabilities",
            "{ not json".to_string(),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_get_unknown_and_bad_id() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;

    let unknown = app
        .request(
            "GET",
            "/api/availabilities/00000000-0000-0000-0000-000000000000",
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let bad = app
        .request(
            "GET",
            "/api/availabilities/not-a-uuid",
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_update_is_not_implemented() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let created = app
        .create_availability(&alice.token, "Fixed", &[(DAY_START, DAY_NOON)])
        .await;
    let id = created.body["data"]["id"].as_str().expect("id");

    let response = app
        .request(
            "PUT",
            &format!("/api/availabilities/{id}"),
            Some(json!({ "name": "Renamed" })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(response.error_code(), Some("NOT_IMPLEMENTED"));
}

#[tokio::test]
async fn test_only_owner_may_delete() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;

    let created = app
        .create_availability(&alice.token, "Mine", &[(DAY_START, DAY_NOON)])
        .await;
    let path = format!(
        "/api/availabilities/{}",
        created.body["data"]["id"].as_str().expect("id")
    );

    let forbidden = app.request("DELETE", &path, None, Some(&bob.token)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert_eq!(forbidden.error_code(), Some("FORBIDDEN"));

    let deleted = app.request("DELETE", &path, None, Some(&alice.token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, Some(&alice.token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = app.request("DELETE", &path, None, Some(&alice.token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_cascades_to_reservations() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;

    let created = app
        .create_availability(&alice.token, "Cascade", &[(DAY_START, DAY_NOON)])
        .await;
    let availability_id = created.body["data"]["id"].as_str().expect("id").to_string();
    let window_id = created.body["data"]["windows"][0]["id"]
        .as_str()
        .expect("window id")
        .to_string();

    let booked = app
        .book(
            &bob.token,
            &window_id,
            "2030-03-04T10:00:00Z",
            "2030-03-04T11:00:00Z",
        )
        .await;
    assert_eq!(booked.status, StatusCode::CREATED);

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/availabilities/{availability_id}"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let mine = app
        .request("GET", "/api/reservations", None, Some(&bob.token))
        .await;
    assert_eq!(mine.body["data"].as_array().map(Vec::len), Some(0));

    // The window went with it.
    let late = app
        .book(
            &bob.token,
            &window_id,
            "2030-03-04T11:00:00Z",
            "2030-03-04T12:00:00Z",
        )
        .await;
    assert_eq!(late.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_account_deletion_removes_availabilities() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;

    app.single_window(&alice.token, "Gone soon", DAY_START, DAY_NOON)
        .await;

    let deleted = app
        .request("DELETE", "/api/users/me", None, Some(&alice.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let listed = app
        .request("GET", "/api/availabilities", None, Some(&bob.token))
        .await;
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_create_after_account_deleted_from_other_session_is_forbidden() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let second_session = app.login("alice@example.com", "pw-alice").await;

    let deleted = app
        .request("DELETE", "/api/users/me", None, Some(&alice.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = app
        .create_availability(&second_session, "Orphan", &[(DAY_START, DAY_NOON)])
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("FORBIDDEN"));
}
