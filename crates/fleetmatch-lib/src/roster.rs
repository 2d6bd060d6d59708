//! Driver roster loading.
//!
//! The roster is the read-only fleet snapshot the matcher consumes. It can be
//! loaded from a JSON array of driver records (file or in-memory buffer) or
//! taken from the built-in demo fleet.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Coordinates, Driver, DriverStatus, Vehicle};

/// Environment variable naming a roster JSON file.
pub const ROSTER_PATH_ENV: &str = "FLEETMATCH_ROSTER_PATH";

/// Collection of driver records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    drivers: Vec<Driver>,
    source: Option<PathBuf>,
}

impl Roster {
    /// Build a roster from already-parsed drivers, rejecting duplicate ids.
    pub fn new(drivers: Vec<Driver>) -> Result<Self> {
        validate_drivers(&drivers)?;
        Ok(Self {
            drivers,
            source: None,
        })
    }

    /// Load a roster from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::RosterNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = fs::File::open(path)?;
        let mut roster = Self::from_reader(file)?;
        roster.source = Some(path.to_path_buf());
        Ok(roster)
    }

    /// Load a roster from a reader containing a JSON array of drivers.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let drivers: Vec<Driver> = serde_json::from_reader(reader)?;
        debug!(driver_count = drivers.len(), "parsed driver roster");
        Self::new(drivers)
    }

    /// Load from `FLEETMATCH_ROSTER_PATH` when set, otherwise the demo fleet.
    pub fn from_env_or_demo() -> Result<Self> {
        match std::env::var(ROSTER_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(Path::new(path.trim())),
            _ => Ok(Self::demo()),
        }
    }

    /// The four-driver demo fleet around Harrisburg, PA.
    pub fn demo() -> Self {
        let certs = |list: &[&str]| list.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        let types = |list: &[&str]| list.iter().map(|t| t.to_string()).collect::<Vec<_>>();

        let drivers = vec![
            Driver {
                id: "driver-1".to_string(),
                name: "John Smith".to_string(),
                status: DriverStatus::Available,
                location: Coordinates::new(40.2732, -76.8867),
                vehicle: Vehicle {
                    supported_types: types(&["standard", "wheelchair"]),
                    oxygen_equipped: true,
                    capacity: 2,
                },
                current_load: 0,
                certifications: certs(&["basic", "medical-attendant"]),
            },
            Driver {
                id: "driver-2".to_string(),
                name: "Sarah Johnson".to_string(),
                status: DriverStatus::OnRoute,
                location: Coordinates::new(40.2851, -76.8741),
                vehicle: Vehicle {
                    supported_types: types(&["standard", "wheelchair", "stretcher"]),
                    oxygen_equipped: true,
                    capacity: 1,
                },
                current_load: 1,
                certifications: certs(&["basic", "medical-attendant", "advanced"]),
            },
            Driver {
                id: "driver-3".to_string(),
                name: "Mike Davis".to_string(),
                status: DriverStatus::Available,
                location: Coordinates::new(40.2692, -76.9012),
                vehicle: Vehicle {
                    supported_types: types(&["standard"]),
                    oxygen_equipped: false,
                    capacity: 3,
                },
                current_load: 0,
                certifications: certs(&["basic"]),
            },
            Driver {
                id: "driver-4".to_string(),
                name: "Emily Brown".to_string(),
                status: DriverStatus::Other("break".to_string()),
                location: Coordinates::new(40.2801, -76.8934),
                vehicle: Vehicle {
                    supported_types: types(&["standard", "wheelchair"]),
                    oxygen_equipped: true,
                    capacity: 2,
                },
                current_load: 0,
                certifications: certs(&["basic", "medical-attendant"]),
            },
        ];

        Self {
            drivers,
            source: None,
        }
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn get(&self, id: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// File the roster was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn validate_drivers(drivers: &[Driver]) -> Result<()> {
    let mut seen = HashSet::with_capacity(drivers.len());
    for (index, driver) in drivers.iter().enumerate() {
        if driver.id.trim().is_empty() {
            return Err(Error::RosterValidation {
                message: format!("driver at index {index} has an empty id"),
            });
        }
        if !driver.location.lat.is_finite() || !driver.location.lng.is_finite() {
            return Err(Error::RosterValidation {
                message: format!("driver {} has a non-finite location", driver.id),
            });
        }
        if !seen.insert(driver.id.as_str()) {
            return Err(Error::DuplicateDriverId {
                id: driver.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn demo_roster_has_four_unique_drivers() {
        let roster = Roster::demo();
        assert_eq!(roster.len(), 4);
        assert!(validate_drivers(roster.drivers()).is_ok());
        assert_eq!(roster.get("driver-2").unwrap().name, "Sarah Johnson");
        assert!(roster.source().is_none());
    }

    #[test]
    fn from_reader_parses_json_array() {
        let json = r#"[{
            "id": "x1",
            "name": "Reader Driver",
            "status": "available",
            "location": {"lat": 1.0, "lng": 1.0},
            "vehicle": {"type": ["standard"], "oxygenEquipped": false, "capacity": 4}
        }]"#;
        let roster = Roster::from_reader(Cursor::new(json)).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.drivers()[0].current_load, 0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut drivers = Roster::demo().drivers().to_vec();
        drivers[1].id = "driver-1".to_string();
        let err = Roster::new(drivers).unwrap_err();
        assert!(matches!(err, Error::DuplicateDriverId { ref id } if id == "driver-1"));
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut drivers = Roster::demo().drivers().to_vec();
        drivers[0].id = "  ".to_string();
        assert!(matches!(
            Roster::new(drivers),
            Err(Error::RosterValidation { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = Roster::from_reader(Cursor::new("{not json")).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Roster::from_path(Path::new("/nonexistent/roster.json")).unwrap_err();
        assert!(matches!(err, Error::RosterNotFound { .. }));
    }
}
