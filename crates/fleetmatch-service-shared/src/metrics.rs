//! Prometheus metrics for fleetmatch services.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use fleetmatch_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//!
//! let config = MetricsConfig::from_env();
//! if let Err(e) = init_metrics(&config) {
//!     eprintln!("metrics unavailable: {e}");
//! }
//! let app: Router = Router::new().route(&config.path, get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

const DEFAULT_METRICS_PATH: &str = "/metrics";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the exposition text; always starts with `/`.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_METRICS_PATH.to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` (default true) and `METRICS_PATH` (default `/metrics`).
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let path = std::env::var("METRICS_PATH")
            .ok()
            .filter(|p| p.starts_with('/') && p.len() > 1)
            .unwrap_or_else(|| DEFAULT_METRICS_PATH.to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder. Call once at startup.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Prometheus exposition text, or a comment when the recorder is not installed.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => write!(f, "failed to install metrics recorder: {}", e),
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increment `fleetmatch_matches_computed_total`.
pub fn record_match_computed(vehicle_type: &str, service: &str) {
    metrics::counter!(
        "fleetmatch_matches_computed_total",
        "vehicle_type" => vehicle_type.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Increment `fleetmatch_matches_failed_total`.
///
/// `reason` is a short label such as `missing_trip`, `invalid_request` or
/// `malformed_body`.
pub fn record_match_failed(reason: &str, service: &str) {
    metrics::counter!(
        "fleetmatch_matches_failed_total",
        "reason" => reason.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record to the `fleetmatch_compatible_drivers` histogram.
pub fn record_compatible_drivers(count: usize) {
    metrics::histogram!("fleetmatch_compatible_drivers").record(count as f64);
}

/// Record to the `fleetmatch_best_score` histogram.
pub fn record_best_score(score: f64) {
    metrics::histogram!("fleetmatch_best_score").record(score);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn disabled_config_is_rejected() {
        let config = MetricsConfig {
            enabled: false,
            path: "/metrics".to_string(),
        };
        assert_eq!(init_metrics(&config), Err(MetricsError::Disabled));
    }

    #[tokio::test]
    async fn handler_renders_text_without_recorder() {
        let output = metrics_handler().await;
        assert!(output.starts_with('#') || output.is_empty() || output.contains("fleetmatch"));
    }

    #[test]
    fn business_helpers_record_without_recorder() {
        record_match_computed("standard", "transport-optimizer");
        record_match_failed("missing_trip", "transport-optimizer");
        record_compatible_drivers(2);
        record_best_score(98.0);
    }

    #[test]
    fn metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
