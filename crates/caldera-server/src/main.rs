use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use caldera_client::SnapshotApi;
use caldera_core::{Credentials, HeatingService};
use caldera_server::config::ServerConfig;
use caldera_server::routes;
use caldera_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;

    // RUST_LOG wins over LOG_LEVEL; access logs stay quiet below warn.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},tower_http=warn", config.log_directive())))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let credentials = Credentials::from_env()?;
    let snapshot = config
        .snapshot
        .as_ref()
        .context("CALDERA_SNAPSHOT must point to a heating account snapshot")?;
    let api = SnapshotApi::open(snapshot, credentials).await?;

    let state = Arc::new(AppState {
        service: HeatingService::new(api),
        api_key: config.api_key.clone(),
    });

    let app = routes::router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.addr();
    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
