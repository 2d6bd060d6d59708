//! Shared infrastructure for fleetmatch HTTP microservices.
//!
//! - [`AppState`]: driver roster shared by all handlers
//! - [`health`]: liveness and readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details error responses
//! - [`ServiceResponse`]: wrapper for successful responses with content type
//! - [`metrics`]: Prometheus recorder and business metric helpers
//! - [`logging`]: JSON or text tracing setup
//! - [`middleware`]: request ids and HTTP metrics
//! - [`MatchRequest`] with the [`Validate`] trait
//!
//! Handlers stay thin: parse, validate, call `fleetmatch-lib`, format.
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fixture-backed [`AppState`]. Enable the
//! `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_best_score, record_compatible_drivers,
    record_match_computed, record_match_failed, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_MISSING_TRIP, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use request::{MatchRequest, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
