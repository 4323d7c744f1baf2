use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::integration::common::{TEST_API_KEY, get_json, setup_test_app_with_auth};

#[tokio::test]
async fn unauthenticated_request_returns_401() {
    let app = setup_test_app_with_auth();

    let (status, json) = get_json(&app.router, "/zones").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");
    assert_eq!(app.api.login_count(), 0);
}

#[tokio::test]
async fn wrong_api_key_returns_401() {
    let app = setup_test_app_with_auth();

    let response = app
        .router
        .oneshot(
            Request::get("/zone-update/0/off")
                .header("authorization", "Bearer wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.api.mode_changes().is_empty());
}

#[tokio::test]
async fn valid_api_key_is_accepted() {
    let app = setup_test_app_with_auth();

    let response = app
        .router
        .oneshot(
            Request::get("/zones")
                .header("authorization", format!("Bearer {TEST_API_KEY}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["zones"][0]["name"], "Living");
}

#[tokio::test]
async fn health_and_favicon_stay_public() {
    let app = setup_test_app_with_auth();

    let (status, _) = get_json(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(&app.router, "/favicon.ico").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_test_app_with_auth();

    let (status, json) = get_json(&app.router, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["info"]["title"], "Caldera API");
    assert!(json["paths"]["/zone-set-temp/{index}/{temp}"].is_object());
}
