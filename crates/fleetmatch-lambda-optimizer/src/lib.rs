//! AWS Lambda function for driver-trip matching.
//!
//! The event payload is a match request (`{ "trip": { ... } }`); the reply is
//! either the ranked optimization response or an RFC 9457 problem.

use chrono::{DateTime, Utc};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use fleetmatch_lambda_shared::{
    get_runtime, init_error_to_problem, init_runtime, init_tracing, LambdaResponse, MatchRequest,
    ProblemDetails,
};
use fleetmatch_lib::{match_trip, OptimizationResponse, Roster};

/// Lambda response - either success or RFC 9457 error.
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(Box<LambdaResponse<OptimizationResponse>>),
    Error(ProblemDetails),
}

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    // A failed roster load is reported per invocation by `handler`.
    if let Err(e) = init_runtime() {
        error!(error = %e, "starting without a driver roster");
    }

    lambda_runtime::run(service_fn(handler)).await
}

pub async fn handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    let request_id = event.context.request_id.clone();

    let Some(runtime) = get_runtime() else {
        return Ok(Response::Error(init_error_to_problem(&request_id)));
    };

    Ok(handle_payload(
        event.payload,
        &request_id,
        runtime.roster(),
        Utc::now(),
    ))
}

/// Parse, validate and match one request payload against `roster` at `now`.
pub fn handle_payload(
    payload: Value,
    request_id: &str,
    roster: &Roster,
    now: DateTime<Utc>,
) -> Response {
    let request: MatchRequest = match serde_json::from_value(payload) {
        Ok(req) => req,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to parse request");
            return Response::Error(ProblemDetails::bad_request(
                format!("Invalid request: {}", e),
                request_id,
            ));
        }
    };

    let trip = match request.validated_trip(request_id) {
        Ok(trip) => trip,
        Err(problem) => {
            warn!(
                request_id = %request_id,
                problem = %problem.type_uri,
                "rejected match request"
            );
            return Response::Error(*problem);
        }
    };

    info!(
        request_id = %request_id,
        vehicle_type = %trip.requirements.vehicle_type,
        roster_size = roster.len(),
        "handling match request"
    );

    let set = match_trip(roster.drivers(), trip, now);

    info!(
        request_id = %request_id,
        compatible = set.compatible_count(),
        best_driver = set.best_match().map(|m| m.driver_id.as_str()).unwrap_or("none"),
        best_score = set.best_match().map(|m| m.score).unwrap_or(0.0),
        "match computed successfully"
    );

    Response::Success(Box::new(LambdaResponse::new(
        OptimizationResponse::from_match_set(request.trip_echo(), set),
    )))
}
