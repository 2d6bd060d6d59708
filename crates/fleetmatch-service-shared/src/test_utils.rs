//! Fixtures for service handler tests.

use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{Duration, Utc};
use fleetmatch_lib::{Coordinates, Pickup, TimeWindow, Trip, TripRequirements};

use crate::state::AppState;

/// Path to the demo roster fixture.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/demo_roster.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared state loaded from [`TEST_FIXTURE_PATH`].
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = PathBuf::from(TEST_FIXTURE_PATH);
            AppState::load(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

/// Standard trip at driver-1's location whose window spans a day either side
/// of the wall clock, so handlers reading `Utc::now()` score it as on time.
pub fn valid_trip() -> Trip {
    let now = Utc::now();
    Trip {
        pickup: Pickup {
            coordinates: Coordinates::new(40.2732, -76.8867),
            time_window: TimeWindow {
                earliest: now - Duration::days(1),
                latest: now + Duration::days(1),
            },
        },
        requirements: TripRequirements {
            vehicle_type: "standard".to_string(),
            oxygen_required: false,
            attendant_needed: false,
        },
    }
}

/// Driver ids in the fixture roster.
pub mod fixture_drivers {
    pub const JOHN_SMITH: &str = "driver-1";
    pub const SARAH_JOHNSON: &str = "driver-2";
    pub const MIKE_DAVIS: &str = "driver-3";
    pub const EMILY_BROWN: &str = "driver-4";
}
