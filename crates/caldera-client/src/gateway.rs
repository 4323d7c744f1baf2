use std::time::Duration;

use caldera_core::error::AppError;
use caldera_core::models::{
    ActionMessage, FlowTemperature, GasConsumption, WaterPressure, ZoneInfo, ZoneList,
};
use caldera_core::util::format_temperature;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Typed HTTP client for a running Caldera gateway.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    timeout_secs: u64,
}

/// `{"error": ..., "message": ...}` body returned by the gateway.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url =
            Url::parse(base_url).map_err(|e| AppError::HttpError(format!("Invalid URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::HttpError(format!(
                "Invalid URL: {base_url} cannot be a base"
            )));
        }

        let client = Client::builder()
            .user_agent("Caldera/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: None,
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Send `Authorization: Bearer <key>` with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub async fn gas_consumption(&self, year: i32, month: u32) -> Result<GasConsumption, AppError> {
        self.get(&[
            "boiler-consumption",
            &year.to_string(),
            &month.to_string(),
        ])
        .await
    }

    pub async fn current_month_gas_consumption(&self) -> Result<GasConsumption, AppError> {
        self.get(&["boiler-consumption-current-month"]).await
    }

    pub async fn zones(&self) -> Result<ZoneList, AppError> {
        self.get(&["zones"]).await
    }

    pub async fn zone_info(&self, index: usize) -> Result<ZoneInfo, AppError> {
        self.get(&["zone-info", &index.to_string()]).await
    }

    pub async fn zone_flow_temperature(&self, index: usize) -> Result<FlowTemperature, AppError> {
        self.get(&["zone-flow-temperature", &index.to_string()])
            .await
    }

    pub async fn update_zone_mode(&self, index: usize, mode: &str) -> Result<ActionMessage, AppError> {
        self.get(&["zone-update", &index.to_string(), mode]).await
    }

    pub async fn update_zone_temperature(
        &self,
        index: usize,
        temperature: f64,
    ) -> Result<ActionMessage, AppError> {
        self.get(&[
            "zone-set-temp",
            &index.to_string(),
            &format_temperature(temperature),
        ])
        .await
    }

    pub async fn water_pressure(&self) -> Result<WaterPressure, AppError> {
        self.get(&["get-water-pressure"]).await
    }

    pub async fn system_info(&self) -> Result<serde_json::Value, AppError> {
        self.get(&["get-system-info"]).await
    }

    pub async fn health(&self) -> Result<serde_json::Value, AppError> {
        self.get(&["health"]).await
    }

    /// Builds `<base_url>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::HttpError(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        debug!("GET {url}");

        let mut request = self.client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to decode response from {url}: {e}")))
    }
}

/// Maps a gateway error response back onto [`AppError`].
fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.is_empty() => status.to_string(),
        Err(_) => body.to_string(),
    };

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::BAD_REQUEST => AppError::InvalidInput(message),
        StatusCode::BAD_GATEWAY => AppError::UpstreamError(message),
        _ => AppError::HttpError(format!("HTTP {}: {message}", status.as_u16())),
    }
}
