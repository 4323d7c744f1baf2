use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use caldera_core::HeatingService;
use caldera_core::testutil::{
    MockHeatingApi, boiler, gas_series, sample_zone, system_with_zones,
};
use caldera_server::routes;
use caldera_server::state::AppState;

pub const TEST_API_KEY: &str = "test-secret-key";

pub struct TestApp {
    pub router: Router,
    pub api: MockHeatingApi,
}

/// A heating account with two zones and a boiler that burned 12.34 m³.
pub fn mock_api() -> MockHeatingApi {
    let mut bath = sample_zone(3, "Bath");
    bath.associated_circuit = None;

    let mut system = system_with_zones(vec![sample_zone(1, "Living"), bath]);
    system.devices = vec![boiler("boiler-1")];

    MockHeatingApi::new(vec![system]).with_device_data("boiler-1", vec![gas_series(123_400.0)])
}

fn build(api: MockHeatingApi, api_key: Option<String>) -> TestApp {
    let state = Arc::new(AppState {
        service: HeatingService::new(api.clone()),
        api_key,
    });

    TestApp {
        router: routes::router(state),
        api,
    }
}

/// Router without authentication, like a default deployment.
pub fn setup_test_app() -> TestApp {
    build(mock_api(), None)
}

/// Router without authentication around a customised mock.
pub fn setup_test_app_for(api: MockHeatingApi) -> TestApp {
    build(api, None)
}

/// Router that requires `Bearer TEST_API_KEY`.
pub fn setup_test_app_with_auth() -> TestApp {
    build(mock_api(), Some(TEST_API_KEY.to_string()))
}

/// GET `uri` and decode the JSON body.
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
