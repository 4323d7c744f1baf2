use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Heating client objects
// ---------------------------------------------------------------------------

/// A heating system as reported by the heating client.
///
/// Only the fields Caldera reads are named; everything else the client
/// reports is kept in `extra` so the system can be dumped verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub id: String,
    pub home: Home,
    #[serde(default)]
    pub water_pressure: Option<f64>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub circuits: Vec<Circuit>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub name: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub system_id: String,
    /// Zone index as addressed by the vendor API (not the list position).
    pub index: u32,
    pub name: String,
    #[serde(default)]
    pub current_room_temperature: Option<f64>,
    #[serde(default)]
    pub desired_room_temperature_setpoint: Option<f64>,
    pub heating: ZoneHeating,
    #[serde(default)]
    pub associated_circuit: Option<Circuit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneHeating {
    pub operation_mode_heating: ZoneOperatingMode,
    #[serde(default)]
    pub manual_mode_setpoint_heating: Option<f64>,
    #[serde(default)]
    pub set_back_temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    pub index: u32,
    #[serde(default)]
    pub circuit_state: Option<String>,
    #[serde(default)]
    pub current_circuit_flow_temperature: Option<f64>,
    #[serde(default)]
    pub heating_curve: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_uuid: String,
    pub name: String,
    /// Vendor device class, e.g. `BOILER` or `CONTROL`.
    pub device_type: String,
    #[serde(default)]
    pub product_name: Option<String>,
}

impl Device {
    pub fn is_boiler(&self) -> bool {
        self.device_type == "BOILER"
    }
}

/// One energy series of a device (e.g. gas consumed for hot water).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceData {
    pub operation_mode: String,
    pub energy_type: String,
    pub resolution: DeviceDataBucketResolution,
    #[serde(default)]
    pub data: Vec<DeviceDataBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDataBucket {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneOperatingMode {
    Manual,
    Off,
    TimeControlled,
}

impl ZoneOperatingMode {
    /// Vendor wire name, as sent in `operationMode`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Off => "OFF",
            Self::TimeControlled => "TIME_CONTROLLED",
        }
    }
}

impl fmt::Display for ZoneOperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZoneOperatingMode {
    type Err = String;

    /// Parses the user-facing names (`manual`, `off`, `time_controlled`),
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "off" => Ok(Self::Off),
            "time_controlled" => Ok(Self::TimeControlled),
            other => Err(format!("Invalid zone operating mode: {other}")),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceDataBucketResolution {
    Hour,
    Day,
    Month,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasConsumption {
    pub consumption_m3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterPressure {
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    /// Position of the zone in the system's zone list.
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneList {
    pub zones: Vec<ZoneSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub index: usize,
    pub name: String,
    pub current_temperature: Option<f64>,
    pub desired_temperature: Option<f64>,
    pub heating_state: ZoneOperatingMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowTemperature {
    pub flow_temperature: f64,
}

/// Confirmation returned by write operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing_is_case_insensitive() {
        assert_eq!(
            "manual".parse::<ZoneOperatingMode>(),
            Ok(ZoneOperatingMode::Manual)
        );
        assert_eq!("OFF".parse::<ZoneOperatingMode>(), Ok(ZoneOperatingMode::Off));
        assert_eq!(
            "Time_Controlled".parse::<ZoneOperatingMode>(),
            Ok(ZoneOperatingMode::TimeControlled)
        );
        assert!("eco".parse::<ZoneOperatingMode>().is_err());
    }

    #[test]
    fn test_mode_wire_name() {
        assert_eq!(ZoneOperatingMode::TimeControlled.name(), "TIME_CONTROLLED");
        let json = serde_json::to_value(ZoneOperatingMode::Manual).unwrap();
        assert_eq!(json, "MANUAL");
    }

    #[test]
    fn test_system_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "id": "sys-1",
            "home": {"name": "Home", "time_zone": "Europe/Berlin"},
            "water_pressure": 1.6,
            "outdoor_temperature": 7.5,
            "configuration": {"eco_mode": false}
        });

        let system: System = serde_json::from_value(raw).unwrap();
        assert_eq!(system.water_pressure, Some(1.6));
        assert!(system.zones.is_empty());
        assert_eq!(system.extra["outdoor_temperature"], 7.5);

        let dumped = serde_json::to_value(&system).unwrap();
        assert_eq!(dumped["configuration"]["eco_mode"], false);
        assert_eq!(dumped["home"]["time_zone"], "Europe/Berlin");
    }

    #[test]
    fn test_boiler_detection() {
        let device = Device {
            device_uuid: "d1".into(),
            name: "ecoTEC".into(),
            device_type: "BOILER".into(),
            product_name: None,
        };
        assert!(device.is_boiler());
    }
}
