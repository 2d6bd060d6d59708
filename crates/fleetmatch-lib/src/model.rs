//! Driver and trip records as supplied by callers.
//!
//! Field names follow the camelCase JSON contract used by the fleet-state
//! provider and the trip request body.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Current duty status of a driver.
///
/// Only [`DriverStatus::Available`] and [`DriverStatus::OnRoute`] are
/// schedulable. Any other status string is preserved verbatim so it can be
/// echoed back in incompatibility reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DriverStatus {
    Available,
    OnRoute,
    OffDuty,
    Other(String),
}

impl DriverStatus {
    /// Whether a driver in this status may be assigned a trip.
    pub fn is_schedulable(&self) -> bool {
        matches!(self, DriverStatus::Available | DriverStatus::OnRoute)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DriverStatus::Available => "available",
            DriverStatus::OnRoute => "on-route",
            DriverStatus::OffDuty => "off-duty",
            DriverStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for DriverStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "available" => DriverStatus::Available,
            "on-route" => DriverStatus::OnRoute,
            "off-duty" => DriverStatus::OffDuty,
            _ => DriverStatus::Other(value),
        }
    }
}

impl From<&str> for DriverStatus {
    fn from(value: &str) -> Self {
        DriverStatus::from(value.to_string())
    }
}

impl From<DriverStatus> for String {
    fn from(value: DriverStatus) -> Self {
        match value {
            DriverStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Ride types this vehicle can serve (e.g. `standard`, `wheelchair`).
    #[serde(rename = "type")]
    pub supported_types: Vec<String>,
    pub oxygen_equipped: bool,
    /// Seat capacity.
    pub capacity: u32,
}

impl Vehicle {
    pub fn supports(&self, vehicle_type: &str) -> bool {
        self.supported_types.iter().any(|t| t == vehicle_type)
    }
}

/// Read-only driver snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub status: DriverStatus,
    pub location: Coordinates,
    pub vehicle: Vehicle,
    /// Seats already occupied.
    #[serde(default)]
    pub current_load: u32,
    #[serde(default)]
    pub certifications: Vec<String>,
}

impl Driver {
    pub fn has_certification(&self, certification: &str) -> bool {
        self.certifications.iter().any(|c| c == certification)
    }
}

/// Acceptable pickup window, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "crate::time::flexible")]
    pub earliest: DateTime<Utc>,
    #[serde(with = "crate::time::flexible")]
    pub latest: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    pub coordinates: Coordinates,
    pub time_window: TimeWindow,
}

/// What the trip needs from a driver and vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequirements {
    pub vehicle_type: String,
    #[serde(default)]
    pub oxygen_required: bool,
    #[serde(default)]
    pub attendant_needed: bool,
}

/// A single trip request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub pickup: Pickup,
    pub requirements: TripRequirements,
}

impl Trip {
    /// Reject trips the matcher cannot score meaningfully.
    pub fn validate(&self) -> Result<()> {
        let Coordinates { lat, lng } = self.pickup.coordinates;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(invalid_trip(format!(
                "pickup latitude {lat} must be between -90 and 90"
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid_trip(format!(
                "pickup longitude {lng} must be between -180 and 180"
            )));
        }
        if self.requirements.vehicle_type.trim().is_empty() {
            return Err(invalid_trip("vehicleType cannot be empty"));
        }
        let window = &self.pickup.time_window;
        if window.earliest > window.latest {
            return Err(invalid_trip("timeWindow.earliest is after timeWindow.latest"));
        }
        Ok(())
    }
}

fn invalid_trip(message: impl Into<String>) -> Error {
    Error::InvalidTrip {
        message: message.into(),
    }
}
