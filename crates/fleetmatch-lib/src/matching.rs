//! Driver-trip matching: gate, score, aggregate and rank.
//!
//! Matching is a pure function of the roster, the trip and the clock value
//! passed in by the caller. Every input driver yields exactly one
//! [`MatchResult`]; incompatible drivers score 0 and keep their rejection
//! reason.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compatibility::check_compatibility;
use crate::geo::{haversine_miles, round_to};
use crate::model::{Coordinates, Driver, DriverStatus, Trip, Vehicle};
use crate::scoring::{
    estimated_arrival, load_balance_score, proximity_score, route_deviation_score,
    time_window_score, travel_minutes, ScoreBreakdown, ScoringWeights, COMPATIBILITY_BONUS,
};

/// Match verdict and score for a single driver.
///
/// Incompatible results only carry identity, the verdict, the reasons and a
/// zero score; the scoring fields are left empty and omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub driver_id: String,
    pub driver_name: String,
    pub compatible: bool,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    /// Miles between the driver and the pickup point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_arrival_minutes: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::time::flexible_option"
    )]
    pub estimated_arrival: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DriverStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vehicle>,
}

impl MatchResult {
    fn incompatible(driver: &Driver, reasons: Vec<String>) -> Self {
        Self {
            driver_id: driver.id.clone(),
            driver_name: driver.name.clone(),
            compatible: false,
            score: 0.0,
            reasons,
            breakdown: None,
            distance: None,
            estimated_arrival_minutes: None,
            estimated_arrival: None,
            current_location: None,
            status: None,
            vehicle: None,
        }
    }
}

/// Ranked results for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSet {
    /// One entry per roster driver, sorted by descending score.
    pub matches: Vec<MatchResult>,
    pub weights: ScoringWeights,
    pub computed_at: DateTime<Utc>,
}

impl MatchSet {
    /// Highest-scoring result, or `None` for an empty roster.
    pub fn best_match(&self) -> Option<&MatchResult> {
        self.matches.first()
    }

    pub fn compatible_count(&self) -> usize {
        self.matches.iter().filter(|m| m.compatible).count()
    }
}

/// Gate and score a single driver.
pub fn match_driver(
    driver: &Driver,
    trip: &Trip,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
) -> MatchResult {
    let compatibility = check_compatibility(driver, trip);
    if !compatibility.compatible {
        debug!(
            driver_id = %driver.id,
            reason = compatibility.reasons.first().map(String::as_str).unwrap_or(""),
            "driver rejected"
        );
        return MatchResult::incompatible(driver, compatibility.reasons);
    }

    let distance = haversine_miles(driver.location, trip.pickup.coordinates);
    let minutes = travel_minutes(distance);
    let arrival = estimated_arrival(now, minutes);

    let breakdown = ScoreBreakdown {
        proximity_score: proximity_score(distance),
        route_deviation_score: route_deviation_score(&driver.status),
        time_window_score: time_window_score(arrival, &trip.pickup.time_window),
        load_balance_score: load_balance_score(driver.current_load, driver.vehicle.capacity),
        compatibility_score: COMPATIBILITY_BONUS,
    };
    let score = weights.apply(&breakdown);

    debug!(
        driver_id = %driver.id,
        distance_miles = distance,
        score = score,
        "driver scored"
    );

    MatchResult {
        driver_id: driver.id.clone(),
        driver_name: driver.name.clone(),
        compatible: true,
        score,
        reasons: Vec::new(),
        breakdown: Some(breakdown),
        distance: Some(distance),
        estimated_arrival_minutes: Some(round_to(minutes, 1)),
        estimated_arrival: Some(arrival),
        current_location: Some(driver.location),
        status: Some(driver.status.clone()),
        vehicle: Some(driver.vehicle.clone()),
    }
}

/// Match a trip against a roster with the default weights.
pub fn match_trip(drivers: &[Driver], trip: &Trip, now: DateTime<Utc>) -> MatchSet {
    match_trip_with_weights(drivers, trip, now, ScoringWeights::DEFAULT)
}

/// Match a trip against a roster with caller-provided weights.
///
/// The sort is stable, so drivers with equal scores keep roster order.
pub fn match_trip_with_weights(
    drivers: &[Driver],
    trip: &Trip,
    now: DateTime<Utc>,
    weights: ScoringWeights,
) -> MatchSet {
    let mut matches: Vec<MatchResult> = drivers
        .iter()
        .map(|driver| match_driver(driver, trip, now, &weights))
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));

    MatchSet {
        matches,
        weights,
        computed_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pickup, TimeWindow, TripRequirements};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
    }

    fn trip_at(lat: f64, lng: f64) -> Trip {
        Trip {
            pickup: Pickup {
                coordinates: Coordinates::new(lat, lng),
                time_window: TimeWindow {
                    earliest: now() - Duration::minutes(5),
                    latest: now() + Duration::minutes(30),
                },
            },
            requirements: TripRequirements {
                vehicle_type: "standard".to_string(),
                oxygen_required: false,
                attendant_needed: false,
            },
        }
    }

    fn driver(id: &str, lat: f64, lng: f64) -> Driver {
        Driver {
            id: id.to_string(),
            name: format!("Driver {id}"),
            status: DriverStatus::Available,
            location: Coordinates::new(lat, lng),
            vehicle: Vehicle {
                supported_types: vec!["standard".to_string()],
                oxygen_equipped: false,
                capacity: 2,
            },
            current_load: 0,
            certifications: Vec::new(),
        }
    }

    #[test]
    fn colocated_available_driver_scores_98() {
        let result = match_driver(
            &driver("a", 40.0, -76.0),
            &trip_at(40.0, -76.0),
            now(),
            &ScoringWeights::DEFAULT,
        );
        assert!(result.compatible);
        assert_eq!(result.distance, Some(0.0));
        assert_eq!(result.score, 98.0);
        assert_eq!(result.estimated_arrival, Some(now()));
        assert_eq!(result.estimated_arrival_minutes, Some(0.0));
        let breakdown = result.breakdown.unwrap();
        assert_eq!(breakdown.proximity_score, 100.0);
        assert_eq!(breakdown.load_balance_score, 80.0);
    }

    #[test]
    fn incompatible_driver_has_zero_score_and_no_breakdown() {
        let mut d = driver("a", 40.0, -76.0);
        d.status = DriverStatus::OffDuty;
        let result = match_driver(&d, &trip_at(40.0, -76.0), now(), &ScoringWeights::DEFAULT);
        assert!(!result.compatible);
        assert_eq!(result.score, 0.0);
        assert!(result.breakdown.is_none());
        assert!(result.distance.is_none());
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let drivers = vec![
            driver("far", 40.1, -76.0),
            driver("tie-1", 40.0, -76.0),
            driver("tie-2", 40.0, -76.0),
        ];
        let set = match_trip(&drivers, &trip_at(40.0, -76.0), now());
        let ids: Vec<&str> = set.matches.iter().map(|m| m.driver_id.as_str()).collect();
        assert_eq!(ids, vec!["tie-1", "tie-2", "far"]);
        assert_eq!(set.best_match().unwrap().driver_id, "tie-1");
    }

    #[test]
    fn empty_roster_has_no_best_match() {
        let set = match_trip(&[], &trip_at(40.0, -76.0), now());
        assert!(set.matches.is_empty());
        assert!(set.best_match().is_none());
        assert_eq!(set.compatible_count(), 0);
    }

    #[test]
    fn incompatible_json_omits_scoring_fields() {
        let mut d = driver("a", 40.0, -76.0);
        d.vehicle.capacity = 0;
        let result = match_driver(&d, &trip_at(40.0, -76.0), now(), &ScoringWeights::DEFAULT);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["driverId"], "a");
        assert_eq!(json["reasons"][0], "Driver at full capacity");
        assert!(json.get("breakdown").is_none());
        assert!(json.get("vehicle").is_none());
    }

    #[test]
    fn compatible_json_omits_reasons() {
        let result = match_driver(
            &driver("a", 40.0, -76.0),
            &trip_at(40.0, -76.0),
            now(),
            &ScoringWeights::DEFAULT,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("reasons").is_none());
        assert_eq!(json["breakdown"]["compatibilityScore"], 100.0);
        assert_eq!(json["status"], "available");
        assert_eq!(json["estimatedArrival"], "2025-01-15T10:00:00.000Z");
        assert_eq!(json["vehicle"]["type"][0], "standard");
    }
}
