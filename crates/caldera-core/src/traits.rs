use std::future::Future;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::AppError;
use crate::models::{Device, DeviceData, DeviceDataBucketResolution, System, Zone, ZoneOperatingMode};

/// Session-holding client of the heating vendor's cloud.
///
/// Authentication, token handling and every vendor protocol detail live
/// behind this trait. Caldera only decides *when* to log in or refresh
/// (see [`Session`](crate::session::Session)) and what to ask for.
pub trait HeatingApi: Send + Sync + Clone {
    /// Opens a vendor session with the configured credentials.
    fn login(&self) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Refreshes the token of an existing session.
    fn refresh_token(&self) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Expiry of the current session, `None` if no session is open.
    fn session_expires(&self) -> Option<DateTime<Utc>>;

    /// All systems visible to the account, in vendor order.
    fn get_systems(&self) -> impl Future<Output = Result<Vec<System>, AppError>> + Send;

    /// Energy series of one device for the window `[start, end]`.
    fn get_data_by_device(
        &self,
        device: &Device,
        resolution: DeviceDataBucketResolution,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Future<Output = Result<Vec<DeviceData>, AppError>> + Send;

    fn set_zone_heating_operation_mode(
        &self,
        zone: &Zone,
        mode: ZoneOperatingMode,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Sets the heating setpoint used while the zone is in manual mode.
    fn set_manual_mode_setpoint(
        &self,
        zone: &Zone,
        setpoint: f64,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Closes the underlying HTTP session.
    fn close(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}
