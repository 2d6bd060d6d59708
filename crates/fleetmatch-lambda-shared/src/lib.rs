//! Shared infrastructure for fleetmatch AWS Lambda functions.
//!
//! - [`LambdaRuntime`]: driver roster loaded once per cold start
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`LambdaResponse`]: wrapper for successful responses with content type
//! - [`MatchRequest`] and the [`Validate`] trait
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides roster fixtures and request ids for
//! handler tests. Enable the `test-utils` feature to use it from other crates.

#![deny(warnings)]

mod problem;
mod requests;
mod response;
mod runtime;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_MISSING_TRIP, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use requests::{MatchRequest, Validate};
pub use response::LambdaResponse;
pub use runtime::{
    get_runtime, init_error_to_problem, init_runtime, init_runtime_with, InitError, LambdaRuntime,
};
pub use tracing_init::init_tracing;
