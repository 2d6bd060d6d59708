//! JSON shapes returned by the optimizer transports.
//!
//! Both the Lambda and the HTTP service build these from a [`MatchSet`] so
//! that clients see the same body regardless of how the matcher is deployed.

use serde::{Deserialize, Serialize};

use crate::matching::{MatchResult, MatchSet};
use crate::scoring::ScoringWeights;

/// Name of the ranking method reported alongside every result set.
pub const ALGORITHM_NAME: &str = "Proximity-Based Multi-Factor Scoring";

/// Algorithm name and the weights used, for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationInfo {
    pub algorithm: String,
    pub weights: ScoringWeights,
}

impl From<ScoringWeights> for OptimizationInfo {
    fn from(weights: ScoringWeights) -> Self {
        Self {
            algorithm: ALGORITHM_NAME.to_string(),
            weights,
        }
    }
}

/// Successful optimizer response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResponse {
    pub success: bool,
    /// The caller's trip object, returned unchanged.
    pub trip: serde_json::Value,
    pub matches: Vec<MatchResult>,
    pub best_match: Option<MatchResult>,
    #[serde(with = "crate::time::flexible")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub optimization: OptimizationInfo,
}

impl OptimizationResponse {
    /// Build the response for `set`, echoing `trip` as the caller sent it.
    pub fn from_match_set(trip: serde_json::Value, set: MatchSet) -> Self {
        let best_match = set.best_match().cloned();
        Self {
            success: true,
            trip,
            matches: set.matches,
            best_match,
            timestamp: set.computed_at,
            optimization: OptimizationInfo::from(set.weights),
        }
    }
}

/// Self-description returned by the info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub description: String,
    pub endpoints: serde_json::Map<String, serde_json::Value>,
    /// Number of drivers in the loaded roster.
    pub demo_drivers: usize,
    pub features: Vec<String>,
}

impl ServiceInfo {
    pub fn new(version: &str, endpoint: &str, roster_size: usize) -> Self {
        let mut endpoints = serde_json::Map::new();
        endpoints.insert(
            format!("POST {}", endpoint),
            serde_json::Value::String("Calculate optimal driver for trip".to_string()),
        );

        Self {
            service: "Medical Transport Route Optimizer".to_string(),
            version: version.to_string(),
            description: "Proximity-based driver assignment for medical transport trips"
                .to_string(),
            endpoints,
            demo_drivers: roster_size,
            features: [
                "Real-time proximity calculation",
                "Multi-factor scoring algorithm",
                "Vehicle compatibility checking",
                "Time window validation",
                "Load balancing",
                "Haversine distance formula",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::match_trip;
    use crate::model::{Coordinates, Pickup, TimeWindow, Trip, TripRequirements};
    use crate::roster::Roster;
    use chrono::{Duration, TimeZone, Utc};

    fn trip() -> Trip {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        Trip {
            pickup: Pickup {
                coordinates: Coordinates::new(40.2732, -76.8867),
                time_window: TimeWindow {
                    earliest: now,
                    latest: now + Duration::minutes(30),
                },
            },
            requirements: TripRequirements {
                vehicle_type: "standard".to_string(),
                oxygen_required: false,
                attendant_needed: false,
            },
        }
    }

    #[test]
    fn response_serializes_contract_fields() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        let trip = trip();
        let set = match_trip(Roster::demo().drivers(), &trip, now);
        let echo = serde_json::to_value(&trip).unwrap();
        let response = OptimizationResponse::from_match_set(echo, set);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["timestamp"], "2025-01-15T10:00:00.000Z");
        assert_eq!(json["optimization"]["algorithm"], ALGORITHM_NAME);
        assert_eq!(json["optimization"]["weights"]["proximity"], 0.4);
        assert_eq!(json["optimization"]["weights"]["compatibility"], 0.05);
        assert_eq!(json["matches"].as_array().unwrap().len(), 4);
        assert_eq!(json["bestMatch"]["driverId"], json["matches"][0]["driverId"]);
        assert_eq!(json["trip"]["requirements"]["vehicleType"], "standard");
    }

    #[test]
    fn empty_roster_serializes_null_best_match() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        let trip = trip();
        let set = match_trip(&[], &trip, now);
        let echo = serde_json::to_value(&trip).unwrap();
        let json = serde_json::to_value(OptimizationResponse::from_match_set(echo, set)).unwrap();
        assert!(json["bestMatch"].is_null());
    }

    #[test]
    fn trip_echo_keeps_fields_the_matcher_ignores() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        let raw = serde_json::json!({
            "id": "trip-42",
            "patientName": "Pat Doe",
            "pickup": {
                "address": "100 Market St",
                "coordinates": {"lat": 40.2732, "lng": -76.8867},
                "timeWindow": {"earliest": "2025-01-15T10:00:00", "latest": "2025-01-15T10:30:00"}
            },
            "dropoff": {"address": "Harrisburg Hospital"},
            "requirements": {"vehicleType": "standard"}
        });
        let trip: Trip = serde_json::from_value(raw.clone()).unwrap();
        let set = match_trip(Roster::demo().drivers(), &trip, now);
        let json = serde_json::to_value(OptimizationResponse::from_match_set(raw.clone(), set))
            .unwrap();
        assert_eq!(json["trip"], raw);
    }

    #[test]
    fn service_info_lists_endpoint_and_roster_size() {
        let info = ServiceInfo::new("0.1.0", "/api/transport-optimizer", 4);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["demoDrivers"], 4);
        assert!(json["endpoints"]
            .as_object()
            .unwrap()
            .contains_key("POST /api/transport-optimizer"));
        assert_eq!(info.features.len(), 6);
    }
}
