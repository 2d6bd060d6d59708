//! Binary gate deciding whether a driver may be scored for a trip.
//!
//! Checks run in a fixed order and stop at the first failure, so at most one
//! reason is ever reported.

use crate::model::{Driver, Trip};

/// Certification a driver needs when the trip requires an attendant.
pub const MEDICAL_ATTENDANT_CERTIFICATION: &str = "medical-attendant";

/// Outcome of the compatibility gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub compatible: bool,
    pub reasons: Vec<String>,
}

impl Compatibility {
    fn compatible() -> Self {
        Self {
            compatible: true,
            reasons: Vec::new(),
        }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            compatible: false,
            reasons: vec![reason.into()],
        }
    }
}

/// Evaluate whether `driver` can serve `trip`.
pub fn check_compatibility(driver: &Driver, trip: &Trip) -> Compatibility {
    let requirements = &trip.requirements;

    if !driver.status.is_schedulable() {
        return Compatibility::rejected(format!("Driver is {}", driver.status));
    }

    if !driver.vehicle.supports(&requirements.vehicle_type) {
        return Compatibility::rejected(format!(
            "Vehicle doesn't support {}",
            requirements.vehicle_type
        ));
    }

    if requirements.oxygen_required && !driver.vehicle.oxygen_equipped {
        return Compatibility::rejected("Vehicle lacks oxygen equipment");
    }

    if driver.current_load >= driver.vehicle.capacity {
        return Compatibility::rejected("Driver at full capacity");
    }

    if requirements.attendant_needed && !driver.has_certification(MEDICAL_ATTENDANT_CERTIFICATION) {
        return Compatibility::rejected("Driver lacks medical attendant certification");
    }

    Compatibility::compatible()
}
