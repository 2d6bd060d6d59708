//! Request body and validation for the optimizer endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fleetmatch_lib::Trip;

use crate::problem::{from_lib_error, ProblemDetails};

/// Validation trait for request types.
pub trait Validate {
    /// Validate the request. `request_id` populates the problem `instance`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// `POST /api/transport-optimizer` body.
///
/// Deserializing keeps the caller's `trip` object next to the parsed [`Trip`]
/// so the response can echo fields the matcher does not model.
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
        let trip = raw.trip.as_ref().map(Trip::deserialize).transpose()?;
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

    /// The trip to match, or the problem rejecting this request.
    pub fn validated_trip(&self, request_id: &str) -> Result<&Trip, Box<ProblemDetails>> {
        let trip = self
            .trip
            .as_ref()
            .ok_or_else(|| Box::new(ProblemDetails::missing_trip(request_id)))?;
        trip.validate()
            .map_err(|e| Box::new(from_lib_error(&e, request_id)))?;
        Ok(trip)
    }

    /// The trip as received, or the serialized [`Trip`] for requests built in code.
    pub fn trip_echo(&self) -> Value {
        match (&self.raw_trip, &self.trip) {
            (Some(raw), _) => raw.clone(),
            (None, Some(trip)) => serde_json::to_value(trip).unwrap_or(Value::Null),
            (None, None) => Value::Null,
        }
    }
}

impl Validate for MatchRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.validated_trip(request_id).map(|_| ())
    }
}
