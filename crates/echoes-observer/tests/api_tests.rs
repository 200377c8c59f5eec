//! Integration tests for the observer pages and API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The state is fully offline with a pinned
//! "today", so every answer is deterministic.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::NaiveDate;
use echoes_core::{ReportService, SyntheticWeather};
use echoes_observer::router::build_router;
use echoes_observer::state::AppState;
use echoes_types::CalendarDate;
use serde_json::Value;
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    let reports = Arc::new(ReportService::offline(42));
    let state = AppState::new(reports, Duration::from_millis(3000))
        .unwrap()
        .with_today(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    Arc::new(state)
}

async fn get(uri: &str) -> Response {
    build_router(make_test_state())
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =========================================================================
// Pages
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let response = get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));

    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("/ws/carousel"));
    assert!(html.contains("<div class=\"value\">Last Quarter</div>"));
    assert!(html.contains("2024-06-01"));
}

#[tokio::test]
async fn test_results_without_date_is_form() {
    let response = get("/results").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("<form"));
    assert!(html.contains("max=\"2024-06-01\""));
    assert!(!html.contains("id=\"report\""));
}

#[tokio::test]
async fn test_results_with_date_shows_report() {
    let response = get("/results?date=2000-01-06").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("On Thursday, January 6, 2000, the moon was in its new moon phase."));
    assert!(html.contains("moon-2000-01-06.jpg"));
    assert!(html.contains("id=\"weather\""));
}

#[tokio::test]
async fn test_results_rejects_future_date() {
    let response = get("/results?date=2030-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("Date cannot be in the future"));
}

#[tokio::test]
async fn test_results_rejects_empty_date() {
    let response = get("/results?date=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("Please enter your date of birth"));
}

// =========================================================================
// JSON API
// =========================================================================

#[tokio::test]
async fn test_list_phases() {
    let response = get("/api/phases").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().map(Vec::len), Some(8));
    assert_eq!(json[0]["label"], "New Moon");
    assert_eq!(json[4]["phase"], "Full Moon");
}

#[tokio::test]
async fn test_get_phase() {
    let response = get("/api/phase?date=2000-01-06").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["descriptor"]["phase_name"], "New Moon");
    assert_eq!(json["descriptor"]["age_days"], 0.5);
    assert_eq!(json["origin"], "calculated");
}

#[tokio::test]
async fn test_get_phase_rejects_impossible_date() {
    let response = get("/api/phase?date=2023-02-30").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("2023-02-30"));
}

#[tokio::test]
async fn test_get_phase_requires_date() {
    let response = get("/api/phase").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Please enter your date of birth");
}

#[tokio::test]
async fn test_get_weather_is_deterministic() {
    let response = get("/api/weather?date=1985-10-26").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    let expected = SyntheticWeather::new(42).generate(CalendarDate::from_parts(1985, 10, 26));
    assert_eq!(json["origin"], "synthetic");
    assert_eq!(json["temperature_c"], expected.temperature_c);
    assert_eq!(json["cloud_cover_pct"], expected.cloud_cover_pct);
    assert_eq!(json["conditions"], expected.conditions.label());
}

#[tokio::test]
async fn test_get_report() {
    let response = get("/api/report?date=1969-07-20").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["date"]["year"], 1969);
    assert_eq!(json["phase"]["descriptor"]["phase_name"], "Waxing Crescent");
    assert_eq!(json["image_origin"], "catalog");
    assert_eq!(json["download_name"], "moon-1969-07-20.jpg");
    assert_eq!(
        json["description"],
        "On Sunday, July 20, 1969, the moon was in its waxing crescent phase."
    );
}

#[tokio::test]
async fn test_get_report_accepts_today() {
    let response = get("/api/report?date=2024-06-01").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_report_rejects_future_date() {
    let response = get("/api/report?date=2024-06-02").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Date cannot be in the future");
}

#[tokio::test]
async fn test_get_current() {
    let response = get("/api/current").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["date"]["year"], 2024);
    assert_eq!(json["date"]["month"], 6);
    assert_eq!(json["date"]["day"], 1);
    assert_eq!(json["phase"]["origin"], "calculated");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = get("/api/nothing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
