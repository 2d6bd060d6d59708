#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use fleetmatch_lib::{Coordinates, Pickup, TimeWindow, Trip, TripRequirements};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
}

/// Trip whose window opens five minutes before [`fixed_now`] and closes 30 after.
pub fn trip_at(lat: f64, lng: f64, vehicle_type: &str) -> Trip {
    Trip {
        pickup: Pickup {
            coordinates: Coordinates::new(lat, lng),
            time_window: TimeWindow {
                earliest: fixed_now() - Duration::minutes(5),
                latest: fixed_now() + Duration::minutes(30),
            },
        },
        requirements: TripRequirements {
            vehicle_type: vehicle_type.to_string(),
            oxygen_required: false,
            attendant_needed: false,
        },
    }
}
