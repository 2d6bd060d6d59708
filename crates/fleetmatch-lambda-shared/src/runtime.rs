//! Cold-start state for the optimizer Lambda.
//!
//! The driver roster is loaded once per execution environment and shared by
//! every invocation. A failed load is remembered so each invocation can
//! answer with a Problem Details payload instead of crashing the runtime.

use std::sync::OnceLock;
use std::time::Instant;

use tracing::{error, info};

use fleetmatch_lib::{Error as LibError, Roster};

use crate::problem::ProblemDetails;

static RUNTIME: OnceLock<Result<LambdaRuntime, InitError>> = OnceLock::new();

/// Error during runtime initialization.
#[derive(Debug, Clone)]
pub struct InitError {
    pub message: String,
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lambda initialization failed: {}", self.message)
    }
}

impl std::error::Error for InitError {}

impl From<LibError> for InitError {
    fn from(err: LibError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Process-wide state shared across invocations.
#[derive(Debug)]
pub struct LambdaRuntime {
    roster: Roster,
}

impl LambdaRuntime {
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

/// Load the roster from `FLEETMATCH_ROSTER_PATH`, falling back to the demo fleet.
pub fn init_runtime() -> Result<&'static LambdaRuntime, InitError> {
    init_runtime_with(Roster::from_env_or_demo)
}

/// Initialize with a custom roster loader.
///
/// Only the first call runs `load`; later calls return the stored outcome.
pub fn init_runtime_with<F>(load: F) -> Result<&'static LambdaRuntime, InitError>
where
    F: FnOnce() -> fleetmatch_lib::Result<Roster>,
{
    let result = RUNTIME.get_or_init(|| {
        let start = Instant::now();
        let roster = load()?;
        let source = roster
            .source()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "demo".to_string());

        info!(
            roster_size = roster.len(),
            source = %source,
            total_init_ms = start.elapsed().as_millis() as u64,
            "Lambda runtime initialization complete"
        );

        Ok(LambdaRuntime { roster })
    });

    result.as_ref().map_err(|e| {
        error!(error = %e, "Lambda runtime initialization failed");
        e.clone()
    })
}

/// The initialized runtime, or `None` before init or after a failed init.
pub fn get_runtime() -> Option<&'static LambdaRuntime> {
    RUNTIME.get().and_then(|result| result.as_ref().ok())
}

/// Problem Details for invocations that arrive without a usable runtime.
pub fn init_error_to_problem(request_id: &str) -> ProblemDetails {
    match RUNTIME.get() {
        Some(Err(e)) => ProblemDetails::internal_error(e.message.clone(), request_id),
        _ => ProblemDetails::internal_error("Runtime initialization failed", request_id),
    }
}
