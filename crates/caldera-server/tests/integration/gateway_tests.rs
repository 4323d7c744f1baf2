use std::sync::Arc;

use tokio::net::TcpListener;

use caldera_client::GatewayClient;
use caldera_core::AppError;
use caldera_core::HeatingService;
use caldera_core::models::ZoneOperatingMode;
use caldera_server::routes;
use caldera_server::state::AppState;

use crate::integration::common::{TEST_API_KEY, mock_api};

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_gateway(api_key: Option<String>) -> (String, caldera_core::testutil::MockHeatingApi) {
    let api = mock_api();
    let state = Arc::new(AppState {
        service: HeatingService::new(api.clone()),
        api_key,
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, routes::router(state)).await.unwrap();
    });

    (format!("http://{addr}"), api)
}

#[tokio::test]
async fn client_reads_zones_and_consumption() {
    let (url, _) = spawn_gateway(None).await;
    let client = GatewayClient::new(&url).unwrap();

    let zones = client.zones().await.unwrap();
    assert_eq!(zones.zones.len(), 2);
    assert_eq!(zones.zones[1].name, "Bath");

    let info = client.zone_info(0).await.unwrap();
    assert_eq!(info.heating_state, ZoneOperatingMode::TimeControlled);

    let consumption = client.gas_consumption(2024, 1).await.unwrap();
    assert_eq!(consumption.consumption_m3, 12.34);

    let pressure = client.water_pressure().await.unwrap();
    assert_eq!(pressure.pressure, Some(1.5));
}

#[tokio::test]
async fn client_writes_mode_and_setpoint() {
    let (url, api) = spawn_gateway(None).await;
    let client = GatewayClient::new(&url).unwrap();

    let result = client.update_zone_mode(0, "manual").await.unwrap();
    assert_eq!(result.message, "Zone Living mode set to manual");

    let result = client.update_zone_temperature(0, 21.0).await.unwrap();
    assert_eq!(result.message, "Temperature for zone Living set to 21.0°C");

    assert_eq!(api.mode_changes(), vec![(1, ZoneOperatingMode::Manual)]);
    assert_eq!(api.setpoints(), vec![(1, 21.0)]);
}

#[tokio::test]
async fn client_maps_error_responses() {
    let (url, _) = spawn_gateway(None).await;
    let client = GatewayClient::new(&url).unwrap();

    let err = client.zone_info(9).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Zone not found"));

    let err = client.update_zone_mode(0, "eco").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn client_sends_api_key() {
    let (url, _) = spawn_gateway(Some(TEST_API_KEY.to_string())).await;

    let anonymous = GatewayClient::new(&url).unwrap();
    let err = anonymous.zones().await.unwrap_err();
    assert!(err.to_string().contains("401"));

    let client = GatewayClient::new(&url).unwrap().with_api_key(TEST_API_KEY);
    assert!(client.zones().await.is_ok());
}
