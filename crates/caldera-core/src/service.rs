use chrono::{Datelike, Local};
use tracing::{debug, error, info};

use crate::error::AppError;
use crate::models::{
    ActionMessage, DeviceDataBucketResolution, FlowTemperature, GasConsumption, System, WaterPressure,
    Zone, ZoneInfo, ZoneList, ZoneOperatingMode, ZoneSummary,
};
use crate::session::Session;
use crate::traits::HeatingApi;
use crate::util::{format_temperature, month_window};

/// Hot-water gas series reported by boilers.
const GAS_OPERATION_MODE: &str = "DOMESTIC_HOT_WATER";
const GAS_ENERGY_TYPE: &str = "CONSUMED_PRIMARY_ENERGY";

/// Boilers report gas in units of 1/10000 m³.
const GAS_UNITS_PER_M3: f64 = 10_000.0;

/// One method per HTTP endpoint: authenticate, call the heating client,
/// shape the answer.
pub struct HeatingService<A> {
    session: Session<A>,
}

impl<A: HeatingApi> HeatingService<A> {
    pub fn new(api: A) -> Self {
        Self {
            session: Session::new(api),
        }
    }

    pub fn session(&self) -> &Session<A> {
        &self.session
    }

    /// Gas consumed for domestic hot water during one calendar month.
    pub async fn gas_consumption(&self, year: i32, month: u32) -> Result<GasConsumption, AppError> {
        info!("Fetching gas consumption for {year}-{month}");
        let (start, end) = month_window(year, month)?;
        let api = self.session.ensure_authenticated().await?;

        let systems = api.get_systems().await?;
        if systems.is_empty() {
            return Err(AppError::NotFound("No system found".into()));
        }

        for system in &systems {
            for device in system.devices.iter().filter(|d| d.is_boiler()) {
                let series = api
                    .get_data_by_device(device, DeviceDataBucketResolution::Month, start, end)
                    .await?;

                let value = series
                    .iter()
                    .find(|d| d.operation_mode == GAS_OPERATION_MODE && d.energy_type == GAS_ENERGY_TYPE)
                    .and_then(|d| d.data.iter().find_map(|bucket| bucket.value));

                if let Some(value) = value {
                    let consumption_m3 = value / GAS_UNITS_PER_M3;
                    info!("Gas consumption: {consumption_m3} m³");
                    return Ok(GasConsumption { consumption_m3 });
                }
            }
        }

        Err(AppError::NotFound("No gas consumption data found".into()))
    }

    /// [`gas_consumption`](Self::gas_consumption) for the current local month.
    pub async fn current_month_gas_consumption(&self) -> Result<GasConsumption, AppError> {
        let now = Local::now();
        self.gas_consumption(now.year(), now.month()).await
    }

    pub async fn water_pressure(&self) -> Result<WaterPressure, AppError> {
        info!("Fetching water pressure");
        let system = self
            .first_system()
            .await?
            .ok_or_else(|| AppError::NotFound("No pressure found".into()))?;

        Ok(WaterPressure {
            pressure: system.water_pressure,
        })
    }

    pub async fn zones(&self) -> Result<ZoneList, AppError> {
        info!("Fetching zones");
        let system = self
            .first_system()
            .await?
            .ok_or_else(|| AppError::NotFound("No zones found".into()))?;

        let zones = system
            .zones
            .into_iter()
            .enumerate()
            .map(|(index, zone)| ZoneSummary {
                index,
                name: zone.name,
            })
            .collect();

        Ok(ZoneList { zones })
    }

    pub async fn zone_info(&self, index: usize) -> Result<ZoneInfo, AppError> {
        info!("Fetching zone info for index {index}");
        let zone = self.find_zone(index).await?;

        Ok(ZoneInfo {
            index,
            name: zone.name,
            current_temperature: zone.current_room_temperature,
            desired_temperature: zone.desired_room_temperature_setpoint,
            heating_state: zone.heating.operation_mode_heating,
        })
    }

    /// Current flow temperature of the heating circuit feeding a zone.
    pub async fn zone_flow_temperature(&self, index: usize) -> Result<FlowTemperature, AppError> {
        info!("Fetching flow temperature for zone {index}");
        let zone = self.find_zone(index).await?;

        let flow_temperature = zone
            .associated_circuit
            .and_then(|circuit| circuit.current_circuit_flow_temperature)
            .ok_or_else(|| {
                AppError::NotFound("Flow temperature not available for this zone".into())
            })?;

        info!("Flow temperature for zone {index}: {flow_temperature}°C");
        Ok(FlowTemperature { flow_temperature })
    }

    /// Switches a zone's heating mode. `mode` is echoed back as given.
    pub async fn update_zone_mode(&self, index: usize, mode: &str) -> Result<ActionMessage, AppError> {
        debug!("Updating zone {index} mode to {mode}");
        let zone = self.find_zone(index).await?;

        let new_mode: ZoneOperatingMode = mode.parse().map_err(|_| {
            error!("Invalid mode: {mode}");
            AppError::InvalidInput("Invalid mode".into())
        })?;

        let api = self.session.ensure_authenticated().await?;
        api.set_zone_heating_operation_mode(&zone, new_mode)
            .await
            .map_err(|e| {
                error!("Failed to update mode for zone {}: {e}", zone.name);
                AppError::UpstreamError(format!("Failed to update mode for zone {}: {e}", zone.name))
            })?;

        debug!("Zone {} mode updated to {mode}", zone.name);
        Ok(ActionMessage {
            message: format!("Zone {} mode set to {mode}", zone.name),
        })
    }

    /// Sets a zone's manual heating setpoint in °C.
    pub async fn update_zone_temperature(
        &self,
        index: usize,
        temperature: f64,
    ) -> Result<ActionMessage, AppError> {
        if !temperature.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "Invalid temperature: {temperature}"
            )));
        }

        let shown = format_temperature(temperature);
        debug!("Setting temperature for zone {index} to {shown}°C");
        let zone = self.find_zone(index).await?;

        let api = self.session.ensure_authenticated().await?;
        api.set_manual_mode_setpoint(&zone, temperature)
            .await
            .map_err(|e| {
                error!("Failed to set temperature for zone {}: {e}", zone.name);
                AppError::UpstreamError(format!(
                    "Failed to set temperature for zone {}: {e}",
                    zone.name
                ))
            })?;

        debug!("Temperature for zone {} set to {shown}°C", zone.name);
        Ok(ActionMessage {
            message: format!("Temperature for zone {} set to {shown}°C", zone.name),
        })
    }

    /// Full dump of the first system, every field the client reports.
    pub async fn system_info(&self) -> Result<serde_json::Value, AppError> {
        let system = self
            .first_system()
            .await?
            .ok_or_else(|| AppError::NotFound("No system found".into()))?;

        Ok(serde_json::to_value(system)?)
    }

    pub async fn close(&self) -> Result<(), AppError> {
        self.session.close().await
    }

    async fn systems(&self) -> Result<Vec<System>, AppError> {
        let api = self.session.ensure_authenticated().await?;
        api.get_systems().await
    }

    async fn first_system(&self) -> Result<Option<System>, AppError> {
        Ok(self.systems().await?.into_iter().next())
    }

    /// Zone at list position `index` in the first system that has one.
    async fn find_zone(&self, index: usize) -> Result<Zone, AppError> {
        self.systems()
            .await?
            .into_iter()
            .find_map(|system| system.zones.into_iter().nth(index))
            .ok_or_else(|| {
                error!("Zone {index} not found");
                AppError::NotFound("Zone not found".into())
            })
    }
}
