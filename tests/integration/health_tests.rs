use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{Delivery, TestApp};

#[tokio::test]
async fn test_health_check() {
    let mut app = TestApp::new(Delivery::Accepted);
    let (status, _, body) = app.get("/health").await;

    assert!(status.is_success());
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_locations() {
    let mut app = TestApp::new(Delivery::Accepted);
    let (status, _, body) = app.get("/ready").await;

    assert!(status.is_success());
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["locations"], 2);
}

#[tokio::test]
async fn test_readiness_fails_without_locations() {
    let mut app = TestApp::with_locations(Delivery::Accepted, Vec::new());
    let (status, _, body) = app.get("/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "no locations configured");
    assert_eq!(body["locations"], 0);
}
