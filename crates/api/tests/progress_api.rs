//! HTTP-level integration tests for the catalog and reading progress.

mod common;

use axum::http::StatusCode;
use common::{body_json, fresh_app, get, put_json, set_progress, SERIES};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_series() {
    let (app, _) = fresh_app();
    let response = get(app, "/api/v1/series").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let series = json["data"].as_array().unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0]["name"], SERIES);
}

#[tokio::test]
async fn test_get_series_lists_books_in_order() {
    let (app, _) = fresh_app();
    let response = get(app, &format!("/api/v1/series/{SERIES}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ordinals: Vec<f64> = json["data"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["ordinal"].as_f64().unwrap())
        .collect();
    assert_eq!(ordinals, vec![1.0, 2.0, 2.5]);
    assert_eq!(json["data"]["books"][1]["chapter_count"], 40);
}

#[tokio::test]
async fn test_unknown_series_returns_400() {
    let (app, _) = fresh_app();
    let response = get(app, "/api/v1/series/Nowhere").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_ARGUMENT");
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_progress_defaults_to_first_book() {
    let (app, store) = fresh_app();
    let response = get(app, &format!("/api/v1/series/{SERIES}/progress/Snick")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["book_ordinal"], 1.0);
    assert_eq!(json["data"]["percent"], 0);
    assert!(json["data"]["last_update"].is_null());

    // Reading the default does not persist it.
    assert_eq!(store.progress_count().await, 0);
}

#[tokio::test]
async fn test_update_progress_round_trips() {
    let (app, _) = fresh_app();
    let response = put_json(
        app.clone(),
        &format!("/api/v1/series/{SERIES}/progress/Snick"),
        serde_json::json!({ "book_ordinal": 2.5, "percent": 40 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["book_ordinal"], 2.5);
    assert!(json["data"]["last_update"].is_string());

    let json = body_json(get(app, &format!("/api/v1/series/{SERIES}/progress/Snick")).await).await;
    assert_eq!(json["data"]["book_ordinal"], 2.5);
    assert_eq!(json["data"]["percent"], 40);
}

#[tokio::test]
async fn test_out_of_range_percent_is_rejected_and_prior_kept() {
    let (app, _) = fresh_app();
    set_progress(&app, "Snick", 2.0, 30).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/series/{SERIES}/progress/Snick"),
        serde_json::json!({ "book_ordinal": 2.0, "percent": 150 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_ARGUMENT");

    let json = body_json(get(app, &format!("/api/v1/series/{SERIES}/progress/Snick")).await).await;
    assert_eq!(json["data"]["book_ordinal"], 2.0);
    assert_eq!(json["data"]["percent"], 30);
}

#[tokio::test]
async fn test_fractional_percent_returns_json_error() {
    let (app, store) = fresh_app();
    let response = put_json(
        app,
        &format!("/api/v1/series/{SERIES}/progress/Snick"),
        serde_json::json!({ "book_ordinal": 2.0, "percent": 12.5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
    assert_eq!(store.progress_count().await, 0);
}

#[tokio::test]
async fn test_unknown_book_ordinal_is_rejected() {
    let (app, _) = fresh_app();
    for ordinal in [3.0, 1.25, -1.0] {
        let response = put_json(
            app.clone(),
            &format!("/api/v1/series/{SERIES}/progress/Snick"),
            serde_json::json!({ "book_ordinal": ordinal, "percent": 10 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "ordinal {ordinal}");
    }
}

#[tokio::test]
async fn test_progress_unavailable_store_returns_503() {
    let (app, store) = fresh_app();
    store.set_available(false);

    let response = get(app, &format!("/api/v1/series/{SERIES}/progress/Snick")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "STORAGE_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Club overview
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_overview_reports_group_safe_book() {
    let (app, _) = fresh_app();
    set_progress(&app, "Snick", 2.5, 50).await;
    set_progress(&app, "Ketchup", 2.0, 90).await;

    let response = get(
        app,
        &format!("/api/v1/series/{SERIES}/overview?members=Snick,Ketchup,Newcomer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let members = json["data"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 3);
    assert_eq!(members[0]["book_title"], "Driftwood");
    // The newcomer has not saved anything and sits on the first book.
    assert_eq!(members[2]["book_ordinal"], 1.0);
    assert_eq!(json["data"]["safe_to_discuss"], 1.0);
}

#[tokio::test]
async fn test_overview_without_members_has_no_safe_book() {
    let (app, _) = fresh_app();
    let json = body_json(get(app, &format!("/api/v1/series/{SERIES}/overview")).await).await;
    assert_eq!(json["data"]["members"].as_array().unwrap().len(), 0);
    assert!(json["data"]["safe_to_discuss"].is_null());
}
