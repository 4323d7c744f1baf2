use thiserror::Error;

/// Application-wide error types for Caldera.
#[derive(Error, Debug)]
pub enum AppError {
    /// The heating client could not open or refresh its session.
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The heating client (or the vendor behind it) rejected a call.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// A system, zone, device or data series does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A request parameter is out of range or unparseable.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reading or parsing a snapshot file failed.
    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP request to a Caldera gateway failed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if the failure came from the heating client rather than
    /// from the caller's input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::AuthError(_)
                | AppError::UpstreamError(_)
                | AppError::Timeout(_)
                | AppError::NetworkError(_)
        )
    }
}
