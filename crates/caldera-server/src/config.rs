use std::path::PathBuf;

use caldera_core::AppError;

/// Settings of the HTTP gateway.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub snapshot: Option<PathBuf>,
    pub log_level: String,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `CALDERA_HOST` (optional, defaults to `127.0.0.1`)
    /// - `CALDERA_PORT` (optional, defaults to 5000)
    /// - `CALDERA_API_KEY` (optional, unset disables auth)
    /// - `CALDERA_SNAPSHOT` (optional, path of the snapshot backend)
    /// - `LOG_LEVEL` (optional, defaults to `INFO`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match non_empty("CALDERA_PORT") {
            None => 5000,
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid CALDERA_PORT '{raw}': must be a port number"
                ))
            })?,
        };

        Ok(Self {
            host: non_empty("CALDERA_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            api_key: non_empty("CALDERA_API_KEY"),
            snapshot: non_empty("CALDERA_SNAPSHOT").map(PathBuf::from),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "INFO".to_string()),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `tracing` level for `LOG_LEVEL`. Accepts the usual names in any case,
    /// including `WARNING` and `CRITICAL`; anything else means `info`.
    pub fn log_directive(&self) -> &'static str {
        match self.log_level.to_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "WARN" | "WARNING" => "warn",
            "ERROR" | "CRITICAL" => "error",
            _ => "info",
        }
    }
}
