use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use caldera_core::AppError;
use caldera_core::models::ZoneOperatingMode;

use crate::integration::common::{get_json, mock_api, setup_test_app, setup_test_app_for};

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["session"], "inactive");

    get_json(&app.router, "/zones").await;
    let (_, json) = get_json(&app.router, "/health").await;
    assert_eq!(json["session"], "active");
}

#[tokio::test]
async fn health_answers_while_login_is_pending() {
    let api = mock_api().with_login_delay(Duration::from_millis(500));
    let app = setup_test_app_for(api);

    let (zones, health) = tokio::join!(get_json(&app.router, "/zones"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        tokio::time::timeout(Duration::from_millis(200), get_json(&app.router, "/health")).await
    });

    let (status, json) = health.expect("health blocked on login");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session"], "inactive");
    assert_eq!(zones.0, StatusCode::OK);
}

#[tokio::test]
async fn favicon_returns_no_content() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(Request::get("/favicon.ico").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Boiler
// ---------------------------------------------------------------------------

#[tokio::test]
async fn boiler_consumption_for_month() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/boiler-consumption/2024/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["consumption_m3"], 12.34);

    let requests = app.api.data_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].2.to_string(), "2024-01-01 00:00:00");
    assert_eq!(requests[0].3.to_string(), "2024-01-31 23:59:59");
}

#[tokio::test]
async fn boiler_consumption_invalid_month_returns_400() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/boiler-consumption/2024/13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");

    let (status, json) = get_json(&app.router, "/boiler-consumption/x/1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");
}

#[tokio::test]
async fn boiler_consumption_current_month() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/boiler-consumption-current-month").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["consumption_m3"], 12.34);
}

#[tokio::test]
async fn water_pressure() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/get-water-pressure").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pressure"], 1.5);
}

#[tokio::test]
async fn system_info_dumps_system() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/get-system-info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "system-1");
    assert_eq!(json["home"]["time_zone"], "Europe/Berlin");
    assert_eq!(json["zones"][1]["name"], "Bath");
    assert_eq!(json["devices"][0]["device_type"], "BOILER");
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zones_are_listed_by_position() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zones").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"zones": [
            {"index": 0, "name": "Living"},
            {"index": 1, "name": "Bath"},
        ]})
    );
}

#[tokio::test]
async fn zone_info_returns_state() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zone-info/0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["index"], 0);
    assert_eq!(json["name"], "Living");
    assert_eq!(json["current_temperature"], 19.5);
    assert_eq!(json["desired_temperature"], 20.0);
    assert_eq!(json["heating_state"], "TIME_CONTROLLED");
}

#[tokio::test]
async fn zone_info_unknown_returns_404() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zone-info/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["message"], "Zone not found");
}

#[tokio::test]
async fn zone_info_negative_index_is_rejected() {
    let app = setup_test_app();

    for uri in ["/zone-info/-1", "/zone-info/abc"] {
        let (status, json) = get_json(&app.router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"], "invalid_input", "{uri}");
        assert!(json["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn zone_flow_temperature() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zone-flow-temperature/0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["flow_temperature"], 38.5);

    let (status, json) = get_json(&app.router, "/zone-flow-temperature/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Flow temperature not available for this zone");
}

#[tokio::test]
async fn zone_update_changes_mode() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zone-update/1/off").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Zone Bath mode set to off");
    assert_eq!(app.api.mode_changes(), vec![(3, ZoneOperatingMode::Off)]);
}

#[tokio::test]
async fn zone_update_invalid_mode_returns_400() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zone-update/0/eco").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid mode");
    assert!(app.api.mode_changes().is_empty());
}

#[tokio::test]
async fn zone_update_upstream_failure_returns_502() {
    let app = setup_test_app();
    app.api
        .fail_next_write(AppError::UpstreamError("HTTP 503".into()));

    let (status, json) = get_json(&app.router, "/zone-update/0/manual").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "upstream_error");
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("Failed to update mode for zone Living")
    );
}

#[tokio::test]
async fn zone_set_temp_sets_setpoint() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zone-set-temp/0/21.5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Temperature for zone Living set to 21.5°C");
    assert_eq!(app.api.setpoints(), vec![(1, 21.5)]);
}

#[tokio::test]
async fn zone_set_temp_accepts_whole_degrees() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zone-set-temp/1/22").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Temperature for zone Bath set to 22.0°C");
}

#[tokio::test]
async fn zone_set_temp_rejects_garbage() {
    let app = setup_test_app();

    let (status, json) = get_json(&app.router, "/zone-set-temp/0/warm").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");

    let (status, json) = get_json(&app.router, "/zone-set-temp/0/NaN").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");
    assert!(app.api.setpoints().is_empty());
}

#[tokio::test]
async fn login_failure_returns_502() {
    let app = setup_test_app();
    app.api
        .fail_next_login(AppError::AuthError("invalid credentials".into()));

    let (status, json) = get_json(&app.router, "/zones").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "auth_error");

    let (status, _) = get_json(&app.router, "/zones").await;
    assert_eq!(status, StatusCode::OK);
}
