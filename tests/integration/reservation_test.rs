//! Integration tests for booking.

mod helpers;

use std::sync::Arc;

use http::StatusCode;
use tokio::task::JoinSet;

const WINDOW_START: &str = "2030-06-01T09:00:00Z";
const WINDOW_END: &str = "2030-06-01T12:00:00Z";

#[tokio::test]
async fn test_booking_scenario_conflict_then_out_of_bounds() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;
    let carol = app.register("carol@example.com", "pw-carol").await;

    let window_id = app
        .single_window(
            &alice.token,
            "Office Hours",
            "2024-06-04T08:00:00Z",
            "2024-06-04T12:00:00Z",
        )
        .await;

    let first = app
        .book(
            &bob.token,
            &window_id,
            "2024-06-04T08:30:00Z",
            "2024-06-04T09:30:00Z",
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["data"]["booker_id"], bob.id.as_str());
    assert_eq!(first.body["data"]["window_id"], window_id.as_str());

    let overlapping = app
        .book(
            &carol.token,
            &window_id,
            "2024-06-04T09:00:00Z",
            "2024-06-04T10:00:00Z",
        )
        .await;
    assert_eq!(overlapping.status, StatusCode::CONFLICT);
    assert_eq!(overlapping.error_code(), Some("CONFLICT"));

    let early = app
        .book(
            &carol.token,
            &window_id,
            "2024-06-04T07:00:00Z",
            "2024-06-04T08:00:00Z",
        )
        .await;
    assert_eq!(early.status, StatusCode::BAD_REQUEST);
    assert_eq!(early.error_code(), Some("OUT_OF_BOUNDS"));

    // Touching bob's reservation at its end is not an overlap.
    let adjacent = app
        .book(
            &carol.token,
            &window_id,
            "2024-06-04T09:30:00Z",
            "2024-06-04T10:30:00Z",
        )
        .await;
    assert_eq!(adjacent.status, StatusCode::CREATED);

    let carols = app
        .request("GET", "/api/reservations", None, Some(&carol.token))
        .await;
    assert_eq!(carols.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_spilling_past_window_end_is_out_of_bounds() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;

    let window_id = app
        .single_window(&alice.token, "Late", WINDOW_START, WINDOW_END)
        .await;

    let response = app
        .book(
            &alice.token,
            &window_id,
            "2030-06-01T11:30:00Z",
            "2030-06-01T12:30:00Z",
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("OUT_OF_BOUNDS"));
}

#[tokio::test]
async fn test_whole_window_can_be_booked() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;

    let window_id = app
        .single_window(&alice.token, "Full", WINDOW_START, WINDOW_END)
        .await;

    let response = app
        .book(&bob.token, &window_id, WINDOW_START, WINDOW_END)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_inverted_interval_is_rejected() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;

    let window_id = app
        .single_window(&alice.token, "Inverted", WINDOW_START, WINDOW_END)
        .await;

    let response = app
        .book(
            &alice.token,
            &window_id,
            "2030-06-01T11:00:00Z",
            "2030-06-01T10:00:00Z",
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_INTERVAL"));
}

#[tokio::test]
async fn test_unknown_window_is_not_found() {
    let app = helpers::TestApp::new();
    let bob = app.register("bob@example.com", "pw-bob").await;

    let response = app
        .book(
            &bob.token,
            "00000000-0000-0000-0000-000000000000",
            "2030-06-01T10:00:00Z",
            "2030-06-01T11:00:00Z",
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_own_reservations_with_summaries() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;
    let carol = app.register("carol@example.com", "pw-carol").await;

    let window_id = app
        .single_window(&alice.token, "Tutoring", WINDOW_START, WINDOW_END)
        .await;

    app.book(
        &bob.token,
        &window_id,
        "2030-06-01T09:00:00Z",
        "2030-06-01T10:00:00Z",
    )
    .await;
    app.book(
        &bob.token,
        &window_id,
        "2030-06-01T11:00:00Z",
        "2030-06-01T12:00:00Z",
    )
    .await;
    app.book(
        &carol.token,
        &window_id,
        "2030-06-01T10:00:00Z",
        "2030-06-01T11:00:00Z",
    )
    .await;

    let mine = app
        .request("GET", "/api/reservations", None, Some(&bob.token))
        .await;
    assert_eq!(mine.status, StatusCode::OK);

    let items = mine.body["data"].as_array().expect("list");
    assert_eq!(items.len(), 2);
    // Latest start first.
    assert_eq!(items[0]["start_time"], "2030-06-01T11:00:00Z");
    assert_eq!(items[1]["start_time"], "2030-06-01T09:00:00Z");
    assert_eq!(items[0]["booker"]["email"], "bob@example.com");
    assert_eq!(items[0]["window"]["id"], window_id.as_str());
    assert_eq!(items[0]["availability"]["name"], "Tutoring");
}

#[tokio::test]
async fn test_booker_account_deletion_frees_slot() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice@example.com", "pw-alice").await;
    let bob = app.register("bob@example.com", "pw-bob").await;
    let carol = app.register("carol@example.com", "pw-carol").await;

    let window_id = app
        .single_window(&alice.token, "Freed", WINDOW_START, WINDOW_END)
        .await;

    let booked = app
        .book(&bob.token, &window_id, WINDOW_START, WINDOW_END)
        .await;
    assert_eq!(booked.status, StatusCode::CREATED);

    let deleted = app
        .request("DELETE", "/api/users/me", None, Some(&bob.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let retry = app
        .book(&carol.token, &window_id, WINDOW_START, WINDOW_END)
        .await;
    assert_eq!(retry.status, StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_overlapping_bookings_admit_exactly_one() {
    let app = Arc::new(helpers::TestApp::new());
    let alice = app.register("alice@example.com", "pw-alice").await;

    let window_id = app
        .single_window(&alice.token, "Contended", WINDOW_START, WINDOW_END)
        .await;

    let mut bookers = Vec::new();
    for i in 0..8 {
        bookers.push(app.register(&format!("user{i}@example.com"), "pw").await);
    }

    let mut tasks = JoinSet::new();
    for booker in bookers {
        let app = Arc::clone(&app);
        let window_id = window_id.clone();
        tasks.spawn(async move {
            app.book(
                &booker.token,
                &window_id,
                "2030-06-01T10:00:00Z",
                "2030-06-01T11:00:00Z",
            )
            .await
            .status
        });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(status) = tasks.join_next().await {
        match status.expect("booking task panicked") {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}
