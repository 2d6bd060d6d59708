//! Medical transport route optimizer service binary.
//!
//! # Configuration
//!
//! - `FLEETMATCH_ROSTER_PATH` - driver roster JSON (demo roster when unset)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - log level (default: info)
//! - `LOG_FORMAT` - json (default) or text
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus endpoint

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use fleetmatch_service_optimizer::{build_router, SERVICE_NAME};
use fleetmatch_service_shared::{init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service(SERVICE_NAME);
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let state = AppState::from_env().map_err(|e| {
        error!(error = %e, "failed to load driver roster");
        e
    })?;

    info!(
        drivers = state.roster().len(),
        source = ?state.roster().source(),
        "driver roster loaded"
    );

    let app = build_router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
