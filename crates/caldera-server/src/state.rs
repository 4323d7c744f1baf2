use caldera_core::{AppError, HeatingApi, HeatingService};

/// Shared application state, available to all route handlers via `State<Arc<AppState<A>>>`.
pub struct AppState<A> {
    pub service: HeatingService<A>,
    /// Bearer key protecting the heating endpoints (None = open access).
    pub api_key: Option<String>,
}

impl<A: HeatingApi> AppState<A> {
    /// Closes the heating client session once the server stops accepting requests.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        tracing::info!("Shutdown signal received. Closing HTTP session...");
        self.service.close().await?;
        tracing::info!("HTTP session closed.");
        Ok(())
    }
}
