use axum::http::{header, StatusCode};
use tower_sessions::session_store::ExpiredDeletion;

use crate::common::{csrf_token, form, today, Delivery, TestApp, ITEM_QUERY};

fn item_uri() -> String {
    format!("/schedule?{}", ITEM_QUERY)
}

#[tokio::test]
async fn test_form_requires_catalog_item() {
    let mut app = TestApp::new(Delivery::Accepted);

    let (status, _, body) = app.get("/schedule").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please select an item from the catalog"));
    assert!(!body.contains("<form"));

    // Status missing
    let (_, _, body) = app
        .get("/schedule?Permalink=b1234567&Location=Music+Library")
        .await;
    assert!(!body.contains("<form"));

    // Known location, unknown status
    let (_, _, body) = app
        .get("/schedule?Permalink=b1234567&Location=Music+Library&Status=CHECKED+OUT")
        .await;
    assert!(!body.contains("<form"));
}

#[tokio::test]
async fn test_form_shows_item() {
    let mut app = TestApp::new(Delivery::Accepted);

    let (status, response, body) = app.get(&item_uri()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));
    assert!(body.contains("<form"));
    assert!(body.contains("Symphonies"));
    assert!(body.contains("music@library.example.edu"));
    assert_eq!(csrf_token(&body).len(), 32);
}

#[tokio::test]
async fn test_invalid_submission_is_cached_and_redisplayed() {
    let mut app = TestApp::new(Delivery::Accepted);
    let (_, _, body) = app.get(&item_uri()).await;
    let token = csrf_token(&body);

    let (status, _, body) = app
        .post(&item_uri(), &form(&token, &[("tel", "12345")]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("alert-danger"));
    assert!(body.contains("Please specify a valid phone number."));
    assert!(body.contains("has-error-tel"));
    assert!(body.contains(r#"value="12345""#));
    assert!(app.sent().is_empty());

    // The next visit is pre-filled with the failed entry, without the error
    let (_, _, body) = app.get(&item_uri()).await;
    assert!(body.contains(r#"value="12345""#));
    assert!(body.contains(r#"value="Ada Lovelace""#));
    assert!(!body.contains("Please specify a valid phone number."));
}

#[tokio::test]
async fn test_missing_fields_are_all_marked() {
    let mut app = TestApp::new(Delivery::Accepted);
    let (_, _, body) = app.get(&item_uri()).await;
    let token = csrf_token(&body);

    let (_, _, body) = app
        .post(&item_uri(), &form(&token, &[("name", ""), ("from", "")]))
        .await;
    assert!(body.contains("Please complete all missing fields."));
    assert!(body.contains("has-error-name"));
    assert!(body.contains("has-error-from"));
    assert!(!body.contains("has-error-email"));
}

#[tokio::test]
async fn test_date_must_be_three_weekdays_out() {
    let mut app = TestApp::new(Delivery::Accepted);
    let (_, _, body) = app.get(&item_uri()).await;
    let token = csrf_token(&body);

    let date = today();
    let (_, _, body) = app
        .post(&item_uri(), &form(&token, &[("date", date.as_str())]))
        .await;
    assert!(body.contains("Please choose a date at least three weekdays from now."));
    assert!(body.contains("has-error-date"));
    assert!(app.sent().is_empty());
}

#[tokio::test]
async fn test_successful_submission_redirects_with_flash() {
    let mut app = TestApp::new(Delivery::Accepted);
    let (_, _, body) = app.get(&item_uri()).await;
    let token = csrf_token(&body);

    let (status, response, _) = app.post(&item_uri(), &form(&token, &[])).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/schedule");

    let sent = app.sent();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    // First matching location in declaration order
    assert_eq!(email.to.address, "music@library.example.edu");
    assert_eq!(email.from.address, "ada@example.com");
    assert_eq!(email.cc, vec![email.from.clone()]);
    assert!(email.subject.starts_with("Schedule For Use "));
    assert!(email.subject.ends_with(": Symphonies"));
    assert!(email.html_body.contains("b3123456a"));

    // Flash shows once after the redirect
    let (_, _, body) = app.get("/schedule").await;
    assert!(body.contains("alert-success"));
    assert!(body.contains("Your request has been sent."));

    let (_, _, body) = app.get("/schedule").await;
    assert!(!body.contains("Your request has been sent."));
}

#[tokio::test]
async fn test_csrf_token_required() {
    let mut app = TestApp::new(Delivery::Accepted);
    let (_, _, _) = app.get(&item_uri()).await;

    let (status, _, body) = app
        .post(&item_uri(), &form("forged-token", &[]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your session has expired. Please try again."));
    assert!(app.sent().is_empty());

    // Without a session there is nothing to compare against
    let mut fresh = TestApp::new(Delivery::Accepted);
    let (_, _, body) = fresh.post(&item_uri(), &form("", &[])).await;
    assert!(body.contains("Your session has expired. Please try again."));
    assert!(fresh.sent().is_empty());
}

#[tokio::test]
async fn test_rejected_delivery() {
    let mut app = TestApp::new(Delivery::Rejected);
    let (_, _, body) = app.get(&item_uri()).await;
    let token = csrf_token(&body);

    let (status, _, body) = app.post(&item_uri(), &form(&token, &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Could not send email."));
    assert_eq!(app.sent().len(), 1);
}

#[tokio::test]
async fn test_transport_fault_is_not_leaked() {
    let mut app = TestApp::new(Delivery::Fault);
    let (_, _, body) = app.get(&item_uri()).await;
    let token = csrf_token(&body);

    let (status, _, body) = app.post(&item_uri(), &form(&token, &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An unexpected error occurred. Please try again."));
    assert!(!body.contains("try again later"));
}

#[tokio::test]
async fn test_post_without_form_body_is_rerendered() {
    let mut app = TestApp::new(Delivery::Accepted);
    let (_, _, body) = app.get(&item_uri()).await;
    let token = csrf_token(&body);
    let (_, _, body) = app
        .post(&item_uri(), &form(&token, &[("tel", "12345")]))
        .await;
    assert!(body.contains(r#"value="Ada Lovelace""#));

    let (status, _, body) = app.post_raw(&item_uri(), "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
    assert!(body.contains("alert-danger"));
    assert!(app.sent().is_empty());

    // The empty submission replaced the cached entry
    let (_, _, body) = app.get(&item_uri()).await;
    assert!(!body.contains(r#"value="Ada Lovelace""#));
}

#[tokio::test]
async fn test_sessions_are_only_kept_for_shown_forms() {
    let mut app = TestApp::new(Delivery::Accepted);

    for _ in 0..20 {
        app.cookie = None;
        let (status, response, _) = app.get("/schedule").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }
    assert_eq!(app.sessions.count().await, 0);

    let (_, _, _) = app.get(&item_uri()).await;
    let (_, _, _) = app.get(&item_uri()).await;
    assert_eq!(app.sessions.count().await, 1);

    // Active sessions survive a sweep
    app.sessions.delete_expired().await.unwrap();
    assert_eq!(app.sessions.count().await, 1);
}
