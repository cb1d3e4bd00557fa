//! Tests for stateless preview and expansion endpoints.

use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use serde_json::{Value, json};

use super::test_support::{BASE_URL, dates, magnesium_json, test_service};

#[tokio::test]
async fn test_preview_returns_next_dates() {
    let service = test_service();

    let mut resp = TestClient::post(format!("{BASE_URL}/preview"))
        .json(&json!({
            "pattern": magnesium_json(),
            "from": "2024-01-02",
            "count": 3
        }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.expect("json body");
    assert_eq!(dates(&body), ["2024-01-04", "2024-01-08", "2024-01-11"]);
}

#[tokio::test]
async fn test_preview_stops_at_horizon() {
    let service = test_service();

    // Only the first 90 days are scanned
    let mut resp = TestClient::post(format!("{BASE_URL}/preview"))
        .json(&json!({
            "pattern": {
                "name": "Quarterly labs",
                "pattern_type": "monthly",
                "days_of_month": [15],
                "start_date": "2024-01-01",
                "end_date": "2024-12-31"
            },
            "from": "2024-01-01",
            "count": 10
        }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.expect("json body");
    assert_eq!(dates(&body), ["2024-01-15", "2024-02-15", "2024-03-15"]);
}

#[tokio::test]
async fn test_preview_missing_days_is_unprocessable() {
    let service = test_service();

    let resp = TestClient::post(format!("{BASE_URL}/preview"))
        .json(&json!({
            "pattern": {
                "name": "Broken",
                "pattern_type": "biweekly",
                "start_date": "2024-01-01"
            },
            "from": "2024-01-01",
            "count": 5
        }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
}

#[tokio::test]
async fn test_preview_rejects_malformed_body() {
    let service = test_service();

    let resp = TestClient::post(format!("{BASE_URL}/preview"))
        .json(&json!({ "from": "not a date" }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_expand_daily_window() {
    let service = test_service();

    let mut resp = TestClient::post(format!("{BASE_URL}/expand"))
        .json(&json!({
            "pattern": {
                "name": "Every other day",
                "pattern_type": "daily",
                "frequency": 2,
                "start_date": "2024-01-01"
            },
            "start": "2024-01-01",
            "end": "2024-01-07"
        }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.expect("json body");
    assert_eq!(
        dates(&body),
        ["2024-01-01", "2024-01-03", "2024-01-05", "2024-01-07"]
    );
}

#[tokio::test]
async fn test_expand_honours_max_results_and_exceptions() {
    let service = test_service();
    let mut pattern = magnesium_json();
    pattern["exceptions"] = json!(["2024-01-04"]);

    let mut resp = TestClient::post(format!("{BASE_URL}/expand"))
        .json(&json!({
            "pattern": pattern,
            "start": "2024-01-01",
            "end": "2024-01-31",
            "max_results": 3
        }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.expect("json body");
    assert_eq!(dates(&body), ["2024-01-01", "2024-01-08", "2024-01-11"]);
}

#[tokio::test]
async fn test_expand_rejects_oversized_window() {
    let service = test_service();

    let resp = TestClient::post(format!("{BASE_URL}/expand"))
        .json(&json!({
            "pattern": magnesium_json(),
            "start": "2024-01-01",
            "end": "2026-01-01"
        }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_expand_without_config_is_server_error() {
    let service = salvo::Service::new(crate::app::api::routes());

    let resp = TestClient::post(format!("{BASE_URL}/expand"))
        .json(&json!({
            "pattern": magnesium_json(),
            "start": "2024-01-01",
            "end": "2024-01-07"
        }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
}
