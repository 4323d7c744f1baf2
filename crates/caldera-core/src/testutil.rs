//! Test utilities: a mock heating client and sample fixtures.
//!
//! The mock records every call behind `Arc<Mutex<_>>` so tests can assert
//! on what the service asked the heating client to do.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde_json::Map;

use crate::error::AppError;
use crate::models::{
    Circuit, Device, DeviceData, DeviceDataBucket, DeviceDataBucketResolution, Home, System, Zone,
    ZoneHeating, ZoneOperatingMode,
};
use crate::traits::HeatingApi;

type DataRequest = (String, DeviceDataBucketResolution, NaiveDateTime, NaiveDateTime);

#[derive(Debug, Default)]
struct MockState {
    systems: Vec<System>,
    device_data: HashMap<String, Vec<DeviceData>>,
    session_expires: Option<DateTime<Utc>>,
    logins: usize,
    refreshes: usize,
    closes: usize,
    login_error: Option<AppError>,
    login_delay: Option<StdDuration>,
    write_error: Option<AppError>,
    data_requests: Vec<DataRequest>,
    mode_changes: Vec<(u32, ZoneOperatingMode)>,
    setpoints: Vec<(u32, f64)>,
}

/// Mock heating client serving fixed systems and device data.
#[derive(Debug, Clone)]
pub struct MockHeatingApi {
    state: Arc<Mutex<MockState>>,
}

impl MockHeatingApi {
    pub fn new(systems: Vec<System>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                systems,
                ..MockState::default()
            })),
        }
    }

    pub fn with_device_data(self, device_uuid: &str, series: Vec<DeviceData>) -> Self {
        self.state
            .lock()
            .unwrap()
            .device_data
            .insert(device_uuid.to_string(), series);
        self
    }

    /// Makes every `login` take `delay` before it completes.
    pub fn with_login_delay(self, delay: StdDuration) -> Self {
        self.state.lock().unwrap().login_delay = Some(delay);
        self
    }

    /// Makes the next `login` fail with `error`.
    pub fn fail_next_login(&self, error: AppError) {
        self.state.lock().unwrap().login_error = Some(error);
    }

    /// Makes the next mode or setpoint change fail with `error`.
    pub fn fail_next_write(&self, error: AppError) {
        self.state.lock().unwrap().write_error = Some(error);
    }

    pub fn expire_session_at(&self, at: DateTime<Utc>) {
        self.state.lock().unwrap().session_expires = Some(at);
    }

    pub fn login_count(&self) -> usize {
        self.state.lock().unwrap().logins
    }

    pub fn refresh_count(&self) -> usize {
        self.state.lock().unwrap().refreshes
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().unwrap().closes
    }

    pub fn data_requests(&self) -> Vec<DataRequest> {
        self.state.lock().unwrap().data_requests.clone()
    }

    /// Recorded `(zone.index, mode)` pairs.
    pub fn mode_changes(&self) -> Vec<(u32, ZoneOperatingMode)> {
        self.state.lock().unwrap().mode_changes.clone()
    }

    /// Recorded `(zone.index, setpoint)` pairs.
    pub fn setpoints(&self) -> Vec<(u32, f64)> {
        self.state.lock().unwrap().setpoints.clone()
    }
}

impl HeatingApi for MockHeatingApi {
    async fn login(&self) -> Result<(), AppError> {
        let delay = self.state.lock().unwrap().login_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.logins += 1;
        if let Some(e) = state.login_error.take() {
            return Err(e);
        }
        state.session_expires = Some(Utc::now() + Duration::hours(1));
        Ok(())
    }

    async fn refresh_token(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.refreshes += 1;
        state.session_expires = Some(Utc::now() + Duration::hours(1));
        Ok(())
    }

    fn session_expires(&self) -> Option<DateTime<Utc>> {
        self.state.lock().unwrap().session_expires
    }

    async fn get_systems(&self) -> Result<Vec<System>, AppError> {
        Ok(self.state.lock().unwrap().systems.clone())
    }

    async fn get_data_by_device(
        &self,
        device: &Device,
        resolution: DeviceDataBucketResolution,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<DeviceData>, AppError> {
        let mut state = self.state.lock().unwrap();
        state
            .data_requests
            .push((device.device_uuid.clone(), resolution, start, end));
        Ok(state
            .device_data
            .get(&device.device_uuid)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_zone_heating_operation_mode(
        &self,
        zone: &Zone,
        mode: ZoneOperatingMode,
    ) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.write_error.take() {
            return Err(e);
        }
        state.mode_changes.push((zone.index, mode));
        Ok(())
    }

    async fn set_manual_mode_setpoint(&self, zone: &Zone, setpoint: f64) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.write_error.take() {
            return Err(e);
        }
        state.setpoints.push((zone.index, setpoint));
        Ok(())
    }

    async fn close(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.closes += 1;
        state.session_expires = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A system with no zones or devices and 1.5 bar of water pressure.
pub fn sample_system() -> System {
    System {
        id: "system-1".to_string(),
        home: Home {
            name: "Home".to_string(),
            serial_number: Some("21224000100211470000000000000000000".to_string()),
            time_zone: Some("Europe/Berlin".to_string()),
            firmware_version: None,
        },
        water_pressure: Some(1.5),
        zones: vec![],
        circuits: vec![],
        devices: vec![],
        extra: Map::new(),
    }
}

pub fn system_with_zones(zones: Vec<Zone>) -> System {
    System {
        zones,
        ..sample_system()
    }
}

/// A time-controlled zone fed by a circuit at 38.5 °C.
pub fn sample_zone(index: u32, name: &str) -> Zone {
    Zone {
        system_id: "system-1".to_string(),
        index,
        name: name.to_string(),
        current_room_temperature: Some(19.5),
        desired_room_temperature_setpoint: Some(20.0),
        heating: ZoneHeating {
            operation_mode_heating: ZoneOperatingMode::TimeControlled,
            manual_mode_setpoint_heating: Some(20.0),
            set_back_temperature: Some(16.0),
        },
        associated_circuit: Some(Circuit {
            index: 0,
            circuit_state: Some("HEATING".to_string()),
            current_circuit_flow_temperature: Some(38.5),
            heating_curve: Some(1.2),
        }),
    }
}

pub fn boiler(device_uuid: &str) -> Device {
    Device {
        device_uuid: device_uuid.to_string(),
        name: "ecoTEC plus".to_string(),
        device_type: "BOILER".to_string(),
        product_name: Some("ecoTEC plus VC 206/5-5".to_string()),
    }
}

/// Monthly hot-water gas series with a single bucket holding `value`.
pub fn gas_series(value: f64) -> DeviceData {
    DeviceData {
        operation_mode: "DOMESTIC_HOT_WATER".to_string(),
        energy_type: "CONSUMED_PRIMARY_ENERGY".to_string(),
        resolution: DeviceDataBucketResolution::Month,
        data: vec![DeviceDataBucket {
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
            value: Some(value),
        }],
    }
}
