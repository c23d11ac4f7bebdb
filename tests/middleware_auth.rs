mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use tower_sessions::session::Id;

#[tokio::test]
async fn test_anonymous_profile_redirects_to_home() {
    let (app, _store) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    let response = server.get("/user/profile").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/");
}

#[tokio::test]
async fn test_anonymous_redirect_leaves_one_shot_message() {
    let (app, store) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    let response = server.get("/user/profile").await;
    let set_cookie = response.header("set-cookie");
    let cookie = common::session_cookie_from(set_cookie.to_str().unwrap());

    let record = common::load_session(&store, &cookie).await.unwrap();
    assert_eq!(record.data["error"], json!("Log in first"));

    let home = server.get("/").add_header("Cookie", cookie.as_str()).await;
    home.assert_status_ok();
    assert!(home.text().contains("Log in first"));

    // shown once only
    let again = server.get("/").add_header("Cookie", cookie.as_str()).await;
    assert!(!again.text().contains("Log in first"));
}

#[tokio::test]
async fn test_logged_in_profile_is_served() {
    let (app, store) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    let (_id, cookie) = common::logged_in_cookie(&store, "admin@example.com").await;

    let response = server
        .get("/user/profile")
        .add_header("Cookie", cookie.as_str())
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("admin@example.com"));
    assert!(body.contains("192.0.2.10"));
}

#[tokio::test]
async fn test_logged_in_request_leaves_no_error_message() {
    let (app, store) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    let (_id, cookie) = common::logged_in_cookie(&store, "admin@example.com").await;

    let response = server
        .get("/user/profile")
        .add_header("Cookie", cookie.as_str())
        .await;

    response.assert_status_ok();
    let record = common::load_session(&store, &cookie).await.unwrap();
    assert!(!record.data.contains_key("error"));
    assert_eq!(record.data["user"], json!("admin@example.com"));
}

#[tokio::test]
async fn test_public_routes_are_not_gated() {
    let (app, _store) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    server.get("/").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_malformed_session_cookie_is_replaced() {
    let (app, _store) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    let response = server
        .get("/user/profile")
        .add_header("Cookie", "session_id=forged")
        .await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    let set_cookie = response.header("set-cookie");
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("session_id="));
    assert!(!set_cookie.starts_with("session_id=forged"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age="));
}

#[tokio::test]
async fn test_planted_session_id_is_not_adopted() {
    let (app, store) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    let planted = format!("session_id={}", Id::default());

    let response = server
        .get("/user/profile")
        .add_header("Cookie", planted.as_str())
        .await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    let issued = common::session_cookie_from(response.header("set-cookie").to_str().unwrap());
    assert_ne!(issued, planted);
    assert!(common::load_session(&store, &planted).await.is_none());
}
