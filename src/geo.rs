//! Great-circle distance between geographic coordinates

use haversine::{distance, Location, Units};

/// Great-circle distance in kilometres between two coordinate pairs.
///
/// This is the offline distance model for the whole crate: the day-route
/// optimizer and the offline conditions provider both ride on it.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = Location {
        latitude: lat1,
        longitude: lon1,
    };
    let to = Location {
        latitude: lat2,
        longitude: lon2,
    };
    distance(from, to, Units::Kilometers)
}
