//! Great-circle distance between pickup points and driver positions.

use crate::model::Coordinates;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance in miles between two coordinates, rounded to 2 decimals.
///
/// Coordinates are taken as-is; range checks belong to request validation.
///
/// ```
/// use fleetmatch_lib::{haversine_miles, Coordinates};
///
/// let a = Coordinates::new(40.2732, -76.8867);
/// assert_eq!(haversine_miles(a, a), 0.0);
/// ```
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlng = (dlng * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_to(EARTH_RADIUS_MILES * c, 2)
}

/// Round half away from zero to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Coordinates::new(40.2851, -76.8741);
        assert_eq!(haversine_miles(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(40.2732, -76.8867);
        let b = Coordinates::new(40.2692, -76.9012);
        assert_eq!(haversine_miles(a, b), haversine_miles(b, a));
    }

    #[test]
    fn one_degree_of_latitude_is_about_69_miles() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        // 3959 * pi / 180
        assert_eq!(haversine_miles(a, b), 69.10);
    }

    #[test]
    fn nearby_demo_drivers_are_under_a_mile_apart() {
        let a = Coordinates::new(40.2732, -76.8867);
        let b = Coordinates::new(40.2692, -76.9012);
        let d = haversine_miles(a, b);
        assert!(d > 0.7 && d < 0.9, "unexpected distance {d}");
    }

    #[test]
    fn round_to_keeps_requested_places() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(7.0, 1), 7.0);
    }
}
