//! Great-circle distance
//!
//! Pure functions; no I/O and no rounding.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::{Coordinate, DistanceMeasurement};

/// Calculate the distance between two points in meters (Haversine formula)
///
/// # Arguments
/// * `a` - First point
/// * `b` - Second point
///
/// # Returns
/// Distance in meters. Swapping the arguments yields the identical value.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> DistanceMeasurement {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    DistanceMeasurement::from_meters(EARTH_RADIUS_METERS * c)
}
