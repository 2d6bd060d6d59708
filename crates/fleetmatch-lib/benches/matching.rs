use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use fleetmatch_lib::{
    match_trip, Coordinates, Driver, DriverStatus, Pickup, Roster, TimeWindow, Trip,
    TripRequirements, Vehicle,
};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/demo_roster.json")
}

static NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap());

static DEMO_ROSTER: Lazy<Roster> =
    Lazy::new(|| Roster::from_path(&fixture_path()).expect("fixture loads"));

// 5,000 drivers spread on a grid around the pickup with a mix of statuses.
static LARGE_FLEET: Lazy<Vec<Driver>> = Lazy::new(|| {
    (0..5_000)
        .map(|i| {
            let status = match i % 7 {
                0 => DriverStatus::OffDuty,
                1 | 2 => DriverStatus::OnRoute,
                _ => DriverStatus::Available,
            };
            Driver {
                id: format!("bench-{i}"),
                name: format!("Bench Driver {i}"),
                status,
                location: Coordinates::new(
                    40.0 + f64::from(i % 100) * 0.002,
                    -76.0 - f64::from(i / 100) * 0.002,
                ),
                vehicle: Vehicle {
                    supported_types: vec!["standard".to_string(), "wheelchair".to_string()],
                    oxygen_equipped: i % 3 == 0,
                    capacity: 1 + (i % 4) as u32,
                },
                current_load: (i % 3) as u32,
                certifications: vec!["basic".to_string()],
            }
        })
        .collect()
});

static STANDARD_TRIP: Lazy<Trip> = Lazy::new(|| trip("standard", false));
static OXYGEN_TRIP: Lazy<Trip> = Lazy::new(|| trip("wheelchair", true));

fn trip(vehicle_type: &str, oxygen_required: bool) -> Trip {
    Trip {
        pickup: Pickup {
            coordinates: Coordinates::new(40.1, -76.1),
            time_window: TimeWindow {
                earliest: *NOW,
                latest: *NOW + Duration::minutes(30),
            },
        },
        requirements: TripRequirements {
            vehicle_type: vehicle_type.to_string(),
            oxygen_required,
            attendant_needed: false,
        },
    }
}

fn benchmark_matching(c: &mut Criterion) {
    let now = *NOW;

    c.bench_function("match_demo_roster", |b| {
        let drivers = DEMO_ROSTER.drivers();
        b.iter(|| {
            let set = match_trip(drivers, &STANDARD_TRIP, now);
            black_box(set.compatible_count())
        });
    });

    c.bench_function("match_5000_standard", |b| {
        b.iter(|| {
            let set = match_trip(&LARGE_FLEET, &STANDARD_TRIP, now);
            black_box(set.best_match().map(|m| m.score))
        });
    });

    c.bench_function("match_5000_oxygen", |b| {
        b.iter(|| {
            let set = match_trip(&LARGE_FLEET, &OXYGEN_TRIP, now);
            black_box(set.matches.len())
        });
    });
}

criterion_group!(benches, benchmark_matching);
criterion_main!(benches);
