use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use caldera_core::HeatingApi;

use crate::auth::require_api_key;
use crate::dto::{
    FlowTemperatureResponse, GasConsumptionResponse, HealthResponse, MessageResponse,
    WaterPressureResponse, ZoneInfoResponse, ZoneListResponse,
};
use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router<A: HeatingApi + 'static>(state: Arc<AppState<A>>) -> Router {
    let api = Router::new()
        .route("/boiler-consumption/{year}/{month}", get(boiler_consumption::<A>))
        .route(
            "/boiler-consumption-current-month",
            get(boiler_consumption_current_month::<A>),
        )
        .route("/zones", get(zones::<A>))
        .route("/zone-info/{index}", get(zone_info::<A>))
        .route("/zone-flow-temperature/{index}", get(zone_flow_temperature::<A>))
        .route("/zone-update/{index}/{mode}", get(zone_update::<A>))
        .route("/zone-set-temp/{index}/{temp}", get(zone_set_temp::<A>))
        .route("/get-water-pressure", get(water_pressure::<A>))
        .route("/get-system-info", get(system_info::<A>))
        .layer(middleware::from_fn_with_state(
            state.api_key.clone(),
            require_api_key,
        ));

    let public = Router::new()
        .route("/health", get(health::<A>))
        .route("/favicon.ico", get(favicon))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Boiler
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/boiler-consumption/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Month, 1-12"),
    ),
    responses(
        (status = 200, description = "Hot-water gas consumption", body = GasConsumptionResponse),
        (status = 400, description = "Invalid month", body = crate::dto::ErrorResponse),
        (status = 404, description = "No consumption data", body = crate::dto::ErrorResponse),
        (status = 502, description = "Heating client failure", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "boiler"
)]
pub async fn boiler_consumption<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
    ApiPath((year, month)): ApiPath<(i32, u32)>,
) -> Result<impl IntoResponse, ApiError> {
    let consumption = state.service.gas_consumption(year, month).await?;
    Ok(axum::Json(GasConsumptionResponse::from(consumption)))
}

#[utoipa::path(
    get,
    path = "/boiler-consumption-current-month",
    responses(
        (status = 200, description = "Hot-water gas consumption this month", body = GasConsumptionResponse),
        (status = 404, description = "No consumption data", body = crate::dto::ErrorResponse),
        (status = 502, description = "Heating client failure", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "boiler"
)]
pub async fn boiler_consumption_current_month<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
) -> Result<impl IntoResponse, ApiError> {
    let consumption = state.service.current_month_gas_consumption().await?;
    Ok(axum::Json(GasConsumptionResponse::from(consumption)))
}

#[utoipa::path(
    get,
    path = "/get-water-pressure",
    responses(
        (status = 200, description = "System water pressure", body = WaterPressureResponse),
        (status = 404, description = "No system", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "boiler"
)]
pub async fn water_pressure<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
) -> Result<impl IntoResponse, ApiError> {
    let pressure = state.service.water_pressure().await?;
    Ok(axum::Json(WaterPressureResponse::from(pressure)))
}

#[utoipa::path(
    get,
    path = "/get-system-info",
    responses(
        (status = 200, description = "Everything the heating client reports about the system", body = serde_json::Value),
        (status = 404, description = "No system", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "boiler"
)]
pub async fn system_info<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
) -> Result<impl IntoResponse, ApiError> {
    let info = state.service.system_info().await?;
    Ok(axum::Json(info))
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/zones",
    responses(
        (status = 200, description = "Zones of the first system", body = ZoneListResponse),
        (status = 404, description = "No system", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "zones"
)]
pub async fn zones<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
) -> Result<impl IntoResponse, ApiError> {
    let zones = state.service.zones().await?;
    Ok(axum::Json(ZoneListResponse::from(zones)))
}

#[utoipa::path(
    get,
    path = "/zone-info/{index}",
    params(
        ("index" = usize, Path, description = "Zone position as listed by /zones")
    ),
    responses(
        (status = 200, description = "Zone temperatures and mode", body = ZoneInfoResponse),
        (status = 404, description = "Zone not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "zones"
)]
pub async fn zone_info<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
    ApiPath(index): ApiPath<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let info = state.service.zone_info(index).await?;
    Ok(axum::Json(ZoneInfoResponse::from(info)))
}

#[utoipa::path(
    get,
    path = "/zone-flow-temperature/{index}",
    params(
        ("index" = usize, Path, description = "Zone position as listed by /zones")
    ),
    responses(
        (status = 200, description = "Flow temperature of the zone's circuit", body = FlowTemperatureResponse),
        (status = 404, description = "Zone or reading not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "zones"
)]
pub async fn zone_flow_temperature<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
    ApiPath(index): ApiPath<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let flow = state.service.zone_flow_temperature(index).await?;
    Ok(axum::Json(FlowTemperatureResponse::from(flow)))
}

#[utoipa::path(
    get,
    path = "/zone-update/{index}/{mode}",
    params(
        ("index" = usize, Path, description = "Zone position as listed by /zones"),
        ("mode" = String, Path, description = "manual, off or time_controlled"),
    ),
    responses(
        (status = 200, description = "Mode changed", body = MessageResponse),
        (status = 400, description = "Invalid mode", body = crate::dto::ErrorResponse),
        (status = 404, description = "Zone not found", body = crate::dto::ErrorResponse),
        (status = 502, description = "Heating client rejected the change", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "zones"
)]
pub async fn zone_update<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
    ApiPath((index, mode)): ApiPath<(usize, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.update_zone_mode(index, &mode).await?;
    Ok(axum::Json(MessageResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/zone-set-temp/{index}/{temp}",
    params(
        ("index" = usize, Path, description = "Zone position as listed by /zones"),
        ("temp" = f64, Path, description = "Manual heating setpoint in °C"),
    ),
    responses(
        (status = 200, description = "Setpoint changed", body = MessageResponse),
        (status = 400, description = "Invalid temperature", body = crate::dto::ErrorResponse),
        (status = 404, description = "Zone not found", body = crate::dto::ErrorResponse),
        (status = 502, description = "Heating client rejected the change", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "zones"
)]
pub async fn zone_set_temp<A: HeatingApi>(
    State(state): State<Arc<AppState<A>>>,
    ApiPath((index, temp)): ApiPath<(usize, f64)>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.update_zone_temperature(index, temp).await?;
    Ok(axum::Json(MessageResponse::from(result)))
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health<A: HeatingApi>(State(state): State<Arc<AppState<A>>>) -> impl IntoResponse {
    let session = if state.service.session().is_active() {
        "active"
    } else {
        "inactive"
    };

    axum::Json(HealthResponse {
        status: "healthy",
        session,
    })
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
