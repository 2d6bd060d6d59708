//! Request payload and validation for the optimizer Lambda.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fleetmatch_lib::Trip;

use crate::problem::{from_lib_error, ProblemDetails};

/// Validation trait for Lambda request types.
pub trait Validate {
    /// Validate the request. `request_id` populates the problem `instance`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of a match request: `{ "trip": { ... } }`.
///
/// The caller's `trip` object is kept verbatim for the response echo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawMatchRequest")]
pub struct MatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip: Option<Trip>,
    #[serde(skip)]
    raw_trip: Option<Value>,
}

#[derive(Deserialize)]
struct RawMatchRequest {
    #[serde(default)]
    trip: Option<Value>,
}

impl TryFrom<RawMatchRequest> for MatchRequest {
    type Error = serde_json::Error;

    fn try_from(raw: RawMatchRequest) -> Result<Self, Self::Error> {
        let trip = match &raw.trip {
            Some(value) => Some(Trip::deserialize(value)?),
            None => None,
        };
        Ok(Self {
            trip,
            raw_trip: raw.trip,
        })
    }
}

impl MatchRequest {
    pub fn new(trip: Trip) -> Self {
        Self {
            trip: Some(trip),
            raw_trip: None,
        }
    }

    /// Borrow the trip once it passes validation.
    pub fn validated_trip(&self, request_id: &str) -> Result<&Trip, Box<ProblemDetails>> {
        let trip = self
            .trip
            .as_ref()
            .ok_or_else(|| Box::new(ProblemDetails::missing_trip(request_id)))?;

        trip.validate()
            .map_err(|e| Box::new(from_lib_error(&e, request_id)))?;
        Ok(trip)
    }

    /// Trip object to return in the response.
    pub fn trip_echo(&self) -> Value {
        if let Some(raw) = &self.raw_trip {
            return raw.clone();
        }
        self.trip
            .as_ref()
            .and_then(|trip| serde_json::to_value(trip).ok())
            .unwrap_or(Value::Null)
    }
}

impl Validate for MatchRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.validated_trip(request_id).map(|_| ())
    }
}
