//! Offline conditions provider: great-circle distance at an assumed speed
//!
//! This is the implementation the core always falls back to. It never
//! fails, needs no network, and returns no weather or place data.

use crate::geo::haversine_km;

use super::{DrivingLeg, ExternalConditionsProvider, PlaceInfo, WeatherNow};

/// Default assumed driving speed
pub const DEFAULT_SPEED_KMH: f64 = 60.0;

/// Conditions provider computing legs from great-circle distance
#[derive(Debug, Clone)]
pub struct OfflineConditionsProvider {
    avg_speed_kmh: f64,
}

impl OfflineConditionsProvider {
    /// Create a provider with the given assumed driving speed
    #[must_use]
    pub fn new(avg_speed_kmh: f64) -> Self {
        Self { avg_speed_kmh }
    }
}

impl Default for OfflineConditionsProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_KMH)
    }
}

impl ExternalConditionsProvider for OfflineConditionsProvider {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn driving_leg(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> DrivingLeg {
        let distance_km = haversine_km(lat1, lon1, lat2, lon2);
        let minutes = (distance_km / self.avg_speed_kmh * 60.0).round();
        DrivingLeg {
            distance_km,
            duration_min: if minutes > 0.0 { minutes as u32 } else { 0 },
        }
    }

    fn weather_now(&self, _lat: f64, _lon: f64) -> WeatherNow {
        WeatherNow::default()
    }

    fn place_info(&self, _lat: f64, _lon: f64) -> PlaceInfo {
        PlaceInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_at_default_speed() {
        // ~111 km along the equator at 60 km/h is ~111 minutes.
        let provider = OfflineConditionsProvider::default();
        let leg = provider.driving_leg(0.0, 0.0, 0.0, 1.0);
        assert!((leg.distance_km - 111.0).abs() < 1.0);
        assert!((110..=113).contains(&leg.duration_min));
    }

    #[test]
    fn test_zero_length_leg_floors_at_zero_minutes() {
        let provider = OfflineConditionsProvider::default();
        let leg = provider.driving_leg(51.7, 94.4, 51.7, 94.4);
        assert_eq!(leg.duration_min, 0);
        assert!(leg.distance_km.abs() < 1e-9);
    }

    #[test]
    fn test_no_weather_or_place_data() {
        let provider = OfflineConditionsProvider::default();
        assert_eq!(provider.weather_now(51.7, 94.4), WeatherNow::default());
        assert_eq!(provider.place_info(51.7, 94.4), PlaceInfo::default());
        assert_eq!(provider.name(), "offline");
    }

    #[test]
    fn test_slower_speed_lengthens_the_leg() {
        let provider = OfflineConditionsProvider::new(30.0);
        let leg = provider.driving_leg(0.0, 0.0, 0.0, 1.0);
        assert!(leg.duration_min > 200);
    }
}
