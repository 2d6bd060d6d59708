//! Liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `ok`, or `not_ready: <reason>`.
    pub status: String,

    pub service: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivers_loaded: Option<usize>,

    /// Roster file path, or `demo` for the built-in roster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster_source: Option<String>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            drivers_loaded: None,
            roster_source: None,
        }
    }

    pub fn ready(service: &str, version: &str, drivers: usize, source: String) -> Self {
        Self {
            drivers_loaded: Some(drivers),
            roster_source: Some(source),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// `GET /health/live`: 200 whenever the process is serving.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// `GET /health/ready`: 200 with the roster size, 503 when no drivers are loaded.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let roster = state.roster();

    if roster.is_empty() {
        let status = HealthStatus::not_ready(service, version, "no drivers loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let source = roster
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "demo".to_string());
    let status = HealthStatus::ready(service, version, roster.len(), source);
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetmatch_lib::Roster;

    #[test]
    fn alive_omits_roster_fields() {
        let json = serde_json::to_string(&HealthStatus::alive("svc", "0.1.0")).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("drivers_loaded"));
    }

    #[tokio::test]
    async fn ready_reports_demo_roster() {
        let state = AppState::from_roster(Roster::demo());
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_roster_is_not_ready() {
        let state = AppState::from_roster(Roster::default());
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
