use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use caldera_core::Credentials;
use caldera_core::error::AppError;
use caldera_core::models::{
    Device, DeviceData, DeviceDataBucketResolution, System, Zone, ZoneOperatingMode,
};
use caldera_core::traits::HeatingApi;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Recorded state of a heating account: its systems plus the energy series
/// of each device, keyed by `device_uuid`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub systems: Vec<System>,
    #[serde(default)]
    pub device_data: HashMap<String, Vec<DeviceData>>,
}

struct Inner {
    credentials: Credentials,
    snapshot: RwLock<Snapshot>,
    session: Mutex<Option<DateTime<Utc>>>,
}

/// Heating client serving a recorded account snapshot.
///
/// Behaves like a vendor session: data calls need a live login, tokens
/// expire after `session_ttl`, and mode/setpoint changes are visible to later
/// reads. Changes stay in memory and are never written back to disk.
#[derive(Clone)]
pub struct SnapshotApi {
    inner: Arc<Inner>,
    session_ttl: Duration,
}

impl SnapshotApi {
    pub fn new(snapshot: Snapshot, credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(Inner {
                credentials,
                snapshot: RwLock::new(snapshot),
                session: Mutex::new(None),
            }),
            session_ttl: Duration::hours(1),
        }
    }

    /// Load a snapshot from a JSON file.
    pub async fn open(path: impl AsRef<Path>, credentials: Credentials) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::SnapshotError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| {
            AppError::SnapshotError(format!("Invalid snapshot {}: {e}", path.display()))
        })?;

        info!(
            "Loaded snapshot {} ({} systems)",
            path.display(),
            snapshot.systems.len()
        );
        Ok(Self::new(snapshot, credentials))
    }

    /// Lifetime of a session token before it must be refreshed.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Snapshot>, AppError> {
        self.inner
            .snapshot
            .read()
            .map_err(|_| AppError::Generic("snapshot lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Snapshot>, AppError> {
        self.inner
            .snapshot
            .write()
            .map_err(|_| AppError::Generic("snapshot lock poisoned".into()))
    }

    fn session(&self) -> Result<MutexGuard<'_, Option<DateTime<Utc>>>, AppError> {
        self.inner
            .session
            .lock()
            .map_err(|_| AppError::Generic("session lock poisoned".into()))
    }

    fn require_session(&self) -> Result<(), AppError> {
        match *self.session()? {
            Some(expires) if expires > Utc::now() => Ok(()),
            Some(_) => Err(AppError::AuthError("Session token expired".into())),
            None => Err(AppError::AuthError("Not logged in".into())),
        }
    }

    /// Applies `change` to the zone addressed by `zone.system_id` / `zone.index`.
    fn update_zone(&self, zone: &Zone, change: impl FnOnce(&mut Zone)) -> Result<(), AppError> {
        self.require_session()?;
        let mut snapshot = self.write()?;

        let target = snapshot
            .systems
            .iter_mut()
            .filter(|s| s.id == zone.system_id)
            .flat_map(|s| s.zones.iter_mut())
            .find(|z| z.index == zone.index)
            .ok_or_else(|| {
                AppError::UpstreamError(format!(
                    "Unknown zone {} in system {}",
                    zone.index, zone.system_id
                ))
            })?;

        change(target);
        Ok(())
    }
}

impl HeatingApi for SnapshotApi {
    async fn login(&self) -> Result<(), AppError> {
        let creds = &self.inner.credentials;
        if creds.user.is_empty() || creds.password.is_empty() {
            return Err(AppError::AuthError("Invalid credentials".into()));
        }

        *self.session()? = Some(Utc::now() + self.session_ttl);
        info!("Logged in as {} ({})", creds.user, creds.brand);
        Ok(())
    }

    async fn refresh_token(&self) -> Result<(), AppError> {
        let mut session = self.session()?;
        if session.is_none() {
            return Err(AppError::AuthError("No session to refresh".into()));
        }
        *session = Some(Utc::now() + self.session_ttl);
        Ok(())
    }

    fn session_expires(&self) -> Option<DateTime<Utc>> {
        self.session().ok().and_then(|s| *s)
    }

    async fn get_systems(&self) -> Result<Vec<System>, AppError> {
        self.require_session()?;
        Ok(self.read()?.systems.clone())
    }

    async fn get_data_by_device(
        &self,
        device: &Device,
        resolution: DeviceDataBucketResolution,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<DeviceData>, AppError> {
        self.require_session()?;
        let snapshot = self.read()?;

        let series = snapshot
            .device_data
            .get(&device.device_uuid)
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(series
            .iter()
            .filter(|d| d.resolution == resolution)
            .map(|d| DeviceData {
                data: d
                    .data
                    .iter()
                    .filter(|b| {
                        let bucket_start = b.start_date.naive_utc();
                        bucket_start >= start && bucket_start <= end
                    })
                    .cloned()
                    .collect(),
                ..d.clone()
            })
            .collect())
    }

    async fn set_zone_heating_operation_mode(
        &self,
        zone: &Zone,
        mode: ZoneOperatingMode,
    ) -> Result<(), AppError> {
        self.update_zone(zone, |z| z.heating.operation_mode_heating = mode)?;
        debug!("Snapshot zone {} switched to {mode}", zone.index);
        Ok(())
    }

    async fn set_manual_mode_setpoint(&self, zone: &Zone, setpoint: f64) -> Result<(), AppError> {
        self.update_zone(zone, |z| {
            z.heating.manual_mode_setpoint_heating = Some(setpoint);
            if z.heating.operation_mode_heating == ZoneOperatingMode::Manual {
                z.desired_room_temperature_setpoint = Some(setpoint);
            }
        })?;
        debug!("Snapshot zone {} manual setpoint {setpoint}", zone.index);
        Ok(())
    }

    async fn close(&self) -> Result<(), AppError> {
        *self.session()? = None;
        debug!("Snapshot session closed");
        Ok(())
    }
}
