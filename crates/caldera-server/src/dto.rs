use serde::Serialize;

use caldera_core::models::{
    ActionMessage, FlowTemperature, GasConsumption, WaterPressure, ZoneInfo, ZoneList, ZoneSummary,
};

// ---------------------------------------------------------------------------
// Boiler
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GasConsumptionResponse {
    /// Gas consumed for domestic hot water, in cubic meters
    pub consumption_m3: f64,
}

impl From<GasConsumption> for GasConsumptionResponse {
    fn from(c: GasConsumption) -> Self {
        Self {
            consumption_m3: c.consumption_m3,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct WaterPressureResponse {
    /// System water pressure in bar, null when the system does not report it
    pub pressure: Option<f64>,
}

impl From<WaterPressure> for WaterPressureResponse {
    fn from(p: WaterPressure) -> Self {
        Self {
            pressure: p.pressure,
        }
    }
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ZoneSummaryResponse {
    pub index: usize,
    pub name: String,
}

impl From<ZoneSummary> for ZoneSummaryResponse {
    fn from(z: ZoneSummary) -> Self {
        Self {
            index: z.index,
            name: z.name,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ZoneListResponse {
    pub zones: Vec<ZoneSummaryResponse>,
}

impl From<ZoneList> for ZoneListResponse {
    fn from(list: ZoneList) -> Self {
        Self {
            zones: list.zones.into_iter().map(ZoneSummaryResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ZoneInfoResponse {
    pub index: usize,
    pub name: String,
    pub current_temperature: Option<f64>,
    pub desired_temperature: Option<f64>,
    /// Heating operation mode: MANUAL, OFF or TIME_CONTROLLED
    pub heating_state: String,
}

impl From<ZoneInfo> for ZoneInfoResponse {
    fn from(z: ZoneInfo) -> Self {
        Self {
            index: z.index,
            name: z.name,
            current_temperature: z.current_temperature,
            desired_temperature: z.desired_temperature,
            heating_state: z.heating_state.to_string(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FlowTemperatureResponse {
    pub flow_temperature: f64,
}

impl From<FlowTemperature> for FlowTemperatureResponse {
    fn from(f: FlowTemperature) -> Self {
        Self {
            flow_temperature: f.flow_temperature,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl From<ActionMessage> for MessageResponse {
    fn from(m: ActionMessage) -> Self {
        Self { message: m.message }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    /// "active" once the heating client is logged in
    pub session: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
