//! Scribecast gateway: serves the dashboard UI, today's STT results, a live
//! SSE stream of newly appended entries, and presigned audio links.
//!
//! Configuration comes from `.env` / the environment:
//!   NCP_ENDPOINT_URL / NCP_ACCESS_KEY / NCP_SECRET_KEY / NCP_BUCKET_NAME
//!   SCRIBECAST_BIND_ADDR (default 127.0.0.1:8000)
//!   SCRIBECAST_POLL_INTERVAL_MS (default 1000)

use std::sync::Arc;
use std::time::Duration;

use scribecast_core::{ObjectStore, S3Store, StoreConfig};
use scribecast_gateway::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoreConfig::from_env()?;
    let store: Arc<dyn ObjectStore> = Arc::new(S3Store::new(&config));

    let poll_interval_ms: u64 = std::env::var("SCRIBECAST_POLL_INTERVAL_MS")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1000);
    let bind_addr =
        std::env::var("SCRIBECAST_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into());

    let state = AppState::new(store, Duration::from_millis(poll_interval_ms));
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("scribecast gateway listening on {bind_addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
