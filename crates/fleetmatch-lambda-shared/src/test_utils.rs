//! Test utilities for Lambda handler testing.
//!
//! ```ignore
//! use fleetmatch_lambda_shared::test_utils::{fixture_roster, mock_request_id, standard_trip};
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{DateTime, Duration, TimeZone, Utc};
use fleetmatch_lib::{Coordinates, Pickup, Roster, TimeWindow, Trip, TripRequirements};

fn fixture_roster_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/demo_roster.json")
}

/// Demo roster loaded from `docs/fixtures/demo_roster.json`.
pub fn fixture_roster() -> &'static Roster {
    static ROSTER: OnceLock<Roster> = OnceLock::new();
    ROSTER.get_or_init(|| Roster::from_path(&fixture_roster_path()).expect("fixture roster should load"))
}

/// Clock value used by handler tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
}

/// Standard trip at John Smith's location with a window around [`fixed_now`].
pub fn standard_trip() -> Trip {
    Trip {
        pickup: Pickup {
            coordinates: Coordinates::new(40.2732, -76.8867),
            time_window: TimeWindow {
                earliest: fixed_now() - Duration::minutes(5),
                latest: fixed_now() + Duration::minutes(30),
            },
        },
        requirements: TripRequirements {
            vehicle_type: "standard".to_string(),
            oxygen_required: false,
            attendant_needed: false,
        },
    }
}

/// Request id in the format `test-request-{suffix}`.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}

/// Driver ids in the fixture roster.
pub mod drivers {
    /// Available, wheelchair and oxygen capable, attendant certified.
    pub const JOHN_SMITH: &str = "driver-1";
    /// On route and already at capacity.
    pub const SARAH_JOHNSON: &str = "driver-2";
    /// Available, standard vehicle only.
    pub const MIKE_DAVIS: &str = "driver-3";
    /// On break.
    pub const EMILY_BROWN: &str = "driver-4";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_roster_loads() {
        let roster = fixture_roster();
        assert_eq!(roster.len(), 4);
        assert!(roster.get(drivers::EMILY_BROWN).is_some());
    }

    #[test]
    fn standard_trip_is_valid() {
        assert!(standard_trip().validate().is_ok());
    }

    #[test]
    fn mock_request_id_formats_correctly() {
        assert_eq!(mock_request_id("123"), "test-request-123");
    }
}
