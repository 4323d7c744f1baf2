use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Caldera API",
        version = "0.1.0",
        description = "Heating system telemetry and control over REST."
    ),
    paths(
        crate::routes::boiler_consumption,
        crate::routes::boiler_consumption_current_month,
        crate::routes::water_pressure,
        crate::routes::system_info,
        crate::routes::zones,
        crate::routes::zone_info,
        crate::routes::zone_flow_temperature,
        crate::routes::zone_update,
        crate::routes::zone_set_temp,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::GasConsumptionResponse,
        crate::dto::WaterPressureResponse,
        crate::dto::ZoneSummaryResponse,
        crate::dto::ZoneListResponse,
        crate::dto::ZoneInfoResponse,
        crate::dto::FlowTemperatureResponse,
        crate::dto::MessageResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "boiler", description = "Boiler consumption, pressure and system dump"),
        (name = "zones", description = "Heating zones: read and control"),
        (name = "system", description = "Health and service status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds Bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("token")
                        .description(Some(
                            "Gateway API key. Required only when CALDERA_API_KEY is set.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
