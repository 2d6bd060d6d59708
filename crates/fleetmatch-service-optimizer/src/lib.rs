//! Medical transport route optimizer HTTP microservice.
//!
//! # Endpoints
//!
//! - `POST /api/transport-optimizer` - rank the roster for a trip
//! - `GET /api/transport-optimizer` - service description
//! - `OPTIONS /api/transport-optimizer` - CORS preflight
//! - `GET /metrics` - Prometheus metrics (path from `METRICS_PATH`)
//! - `GET /health/live`, `GET /health/ready` - probes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use fleetmatch_lib::{match_trip, OptimizationResponse, ServiceInfo};
use fleetmatch_service_shared::{
    extract_or_generate_request_id, health_live, health_ready, metrics_handler, record_best_score,
    record_compatible_drivers, record_match_computed, record_match_failed, AppState, MatchRequest,
    MetricsLayer, ProblemDetails, ServiceResponse, PROBLEM_MISSING_TRIP,
};

/// Path of the optimizer endpoint.
pub const OPTIMIZER_PATH: &str = "/api/transport-optimizer";

/// Service label used in logs and metrics.
pub const SERVICE_NAME: &str = "transport-optimizer";

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(Box<ServiceResponse<OptimizationResponse>>),
    Error(ProblemDetails),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(body) => (*body).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router around `state`.
pub fn build_router(state: AppState, metrics_path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(OPTIMIZER_PATH, get(info_handler).post(optimize_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(cors)
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `GET /api/transport-optimizer`.
async fn info_handler(State(state): State<AppState>) -> impl IntoResponse {
    let info = ServiceInfo::new(env!("CARGO_PKG_VERSION"), OPTIMIZER_PATH, state.roster().len());
    (StatusCode::OK, Json(info))
}

/// Handle `POST /api/transport-optimizer`.
async fn optimize_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection.body_text(), "malformed request body");
            record_match_failed("malformed_body", SERVICE_NAME);
            return Response::Error(ProblemDetails::bad_request(
                format!("Invalid request: {}", rejection.body_text()),
                request_id,
            ));
        }
    };

    let trip = match request.validated_trip(request_id) {
        Ok(trip) => trip,
        Err(problem) => {
            let reason = if problem.type_uri == PROBLEM_MISSING_TRIP {
                "missing_trip"
            } else {
                "invalid_request"
            };
            warn!(request_id = %request_id, reason, "rejected match request");
            record_match_failed(reason, SERVICE_NAME);
            return Response::Error(*problem);
        }
    };

    let roster = state.roster();
    info!(
        request_id = %request_id,
        vehicle_type = %trip.requirements.vehicle_type,
        oxygen_required = trip.requirements.oxygen_required,
        attendant_needed = trip.requirements.attendant_needed,
        roster_size = roster.len(),
        "handling match request"
    );

    let set = match_trip(roster.drivers(), trip, Utc::now());
    let compatible = set.compatible_count();

    record_match_computed(&trip.requirements.vehicle_type, SERVICE_NAME);
    record_compatible_drivers(compatible);
    if let Some(best) = set.best_match().filter(|m| m.compatible) {
        record_best_score(best.score);
    }

    info!(
        request_id = %request_id,
        compatible,
        best_driver = set.best_match().map(|m| m.driver_id.as_str()).unwrap_or("none"),
        "match computed successfully"
    );

    Response::Success(Box::new(ServiceResponse::new(
        OptimizationResponse::from_match_set(request.trip_echo(), set),
    )))
}
