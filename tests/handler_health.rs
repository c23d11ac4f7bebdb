mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use session_gate::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _store) = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["sessions"]["status"], "ok");
    assert!(json.get("version").is_some());
}
