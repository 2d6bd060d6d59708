//! Per-factor scorers and the weighted aggregation.
//!
//! Every scorer returns a value in `[0, 100]`. Proximity and load balance are
//! clamped explicitly; time window and route deviation are bounded by
//! construction.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::round_to;
use crate::model::{DriverStatus, TimeWindow};

/// Average travel speed assumed for ETA estimation.
pub const AVERAGE_SPEED_MPH: f64 = 30.0;

/// Proximity points lost per mile of distance.
pub const PROXIMITY_PENALTY_PER_MILE: f64 = 10.0;

/// Score awarded to every compatible driver for passing the gate.
pub const COMPATIBILITY_BONUS: f64 = 100.0;

/// Route deviation score for drivers already carrying a trip.
pub const ON_ROUTE_DEVIATION_SCORE: f64 = 20.0;

/// Route deviation score for idle drivers.
pub const AVAILABLE_DEVIATION_SCORE: f64 = 100.0;

/// Linear distance score: 100 at the pickup, 0 from 10 miles out.
pub fn proximity_score(distance_miles: f64) -> f64 {
    if distance_miles == 0.0 {
        return 100.0;
    }
    round_to((100.0 - distance_miles * PROXIMITY_PENALTY_PER_MILE).max(0.0), 2)
}

/// Minutes needed to cover `distance_miles` at [`AVERAGE_SPEED_MPH`].
pub fn travel_minutes(distance_miles: f64) -> f64 {
    distance_miles / AVERAGE_SPEED_MPH * 60.0
}

/// Arrival time when leaving at `now` and driving `travel_minutes`.
pub fn estimated_arrival(now: DateTime<Utc>, travel_minutes: f64) -> DateTime<Utc> {
    now + Duration::microseconds((travel_minutes * 60_000_000.0).round() as i64)
}

/// How well an arrival fits the pickup window.
///
/// Early arrivals lose 2 points per minute down to 50; late arrivals lose
/// 5 points per minute down to 0.
pub fn time_window_score(arrival: DateTime<Utc>, window: &TimeWindow) -> f64 {
    if arrival < window.earliest {
        let minutes_early = minutes_between(arrival, window.earliest);
        (100.0 - minutes_early * 2.0).max(50.0)
    } else if arrival > window.latest {
        let minutes_late = minutes_between(window.latest, arrival);
        (100.0 - minutes_late * 5.0).max(0.0)
    } else {
        100.0
    }
}

fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 60_000.0,
        |us| us as f64 / 60_000_000.0,
    )
}

/// Preference for drivers with some, but not too much, load.
pub fn load_balance_score(current_load: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    let utilization = f64::from(current_load) / f64::from(capacity);
    if utilization == 0.0 {
        80.0
    } else if utilization < 0.5 {
        100.0
    } else if utilization < 0.8 {
        70.0
    } else {
        30.0
    }
}

/// Coarse stand-in for route deviation based on duty status alone.
pub fn route_deviation_score(status: &DriverStatus) -> f64 {
    match status {
        DriverStatus::OnRoute => ON_ROUTE_DEVIATION_SCORE,
        _ => AVAILABLE_DEVIATION_SCORE,
    }
}

/// Component scores for one compatible driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub proximity_score: f64,
    pub route_deviation_score: f64,
    pub time_window_score: f64,
    pub load_balance_score: f64,
    pub compatibility_score: f64,
}

/// Coefficients applied to each component score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub proximity: f64,
    pub route_deviation: f64,
    pub time_window: f64,
    pub load_balance: f64,
    pub compatibility: f64,
}

impl ScoringWeights {
    pub const DEFAULT: ScoringWeights = ScoringWeights {
        proximity: 0.40,
        route_deviation: 0.20,
        time_window: 0.25,
        load_balance: 0.10,
        compatibility: 0.05,
    };

    /// Sum of all coefficients.
    pub fn total(&self) -> f64 {
        self.proximity + self.route_deviation + self.time_window + self.load_balance + self.compatibility
    }

    /// Weighted sum of a breakdown, rounded to 2 decimals.
    pub fn apply(&self, breakdown: &ScoreBreakdown) -> f64 {
        let raw = breakdown.proximity_score * self.proximity
            + breakdown.route_deviation_score * self.route_deviation
            + breakdown.time_window_score * self.time_window
            + breakdown.load_balance_score * self.load_balance
            + breakdown.compatibility_score * self.compatibility;
        round_to(raw, 2)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
