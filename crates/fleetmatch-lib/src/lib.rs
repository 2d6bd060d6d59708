//! fleetmatch library entry points.
//!
//! This crate holds the driver-trip matcher: great-circle distance, the
//! compatibility gate, the per-factor scorers and the weighted ranker, plus
//! roster loading and the JSON shapes returned to callers. Higher-level
//! consumers (Lambda, HTTP service) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!
//! Matching is a pure function of the roster, the trip and the current time:
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use fleetmatch_lib::{match_trip, Roster, Trip};
//!
//! let now = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
//! let trip: Trip = serde_json::from_str(r#"{
//!     "pickup": {
//!         "coordinates": {"lat": 40.2732, "lng": -76.8867},
//!         "timeWindow": {"earliest": "2025-01-15T10:00:00Z", "latest": "2025-01-15T10:30:00Z"}
//!     },
//!     "requirements": {"vehicleType": "standard", "oxygenRequired": false, "attendantNeeded": false}
//! }"#).unwrap();
//!
//! let roster = Roster::demo();
//! let set = match_trip(roster.drivers(), &trip, now);
//! assert_eq!(set.matches.len(), roster.len());
//! assert_eq!(set.best_match().map(|m| m.driver_id.as_str()), Some("driver-1"));
//! ```

#![deny(warnings)]

pub mod compatibility;
pub mod error;
pub mod geo;
pub mod matching;
pub mod model;
pub mod output;
pub mod roster;
pub mod scoring;
pub mod time;

pub use compatibility::{check_compatibility, Compatibility, MEDICAL_ATTENDANT_CERTIFICATION};
pub use error::{Error, Result};
pub use geo::{haversine_miles, EARTH_RADIUS_MILES};
pub use matching::{match_driver, match_trip, match_trip_with_weights, MatchResult, MatchSet};
pub use model::{
    Coordinates, Driver, DriverStatus, Pickup, TimeWindow, Trip, TripRequirements, Vehicle,
};
pub use output::{OptimizationInfo, OptimizationResponse, ServiceInfo, ALGORITHM_NAME};
pub use roster::Roster;
pub use scoring::{ScoreBreakdown, ScoringWeights};
