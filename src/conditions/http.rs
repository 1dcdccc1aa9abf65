//! Network-backed conditions provider
//!
//! Driving legs come from the public OSRM router, current weather from
//! Open-Meteo, and opening hours from Overpass. Every call is bounded by a
//! short timeout and catches all failures: the response is then computed
//! offline (legs scaled by a road-detour factor) instead of surfacing an
//! error, so this provider conforms to the same never-failing contract as
//! the offline one.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::warn;

use crate::geo::haversine_km;

use super::{DrivingLeg, ExternalConditionsProvider, OfflineConditionsProvider, PlaceInfo, WeatherNow};

const OSRM_BASE_URL: &str = "https://router.project-osrm.org/route/v1/driving";
const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 8;

/// Default factor applied to great-circle distance when estimating roads
pub const DEFAULT_ROAD_DETOUR_FACTOR: f64 = 1.25;

/// Conditions provider backed by public HTTP services
pub struct HttpConditionsProvider {
    client: Option<Client>,
    offline: OfflineConditionsProvider,
    avg_speed_kmh: f64,
    road_detour_factor: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    #[serde(rename = "temperature_2m")]
    temperature: Option<f64>,
    /// Open-Meteo reports wind in km/h
    #[serde(rename = "wind_speed_10m")]
    wind_speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: Option<OpenMeteoCurrent>,
}

#[derive(Debug, Deserialize)]
struct OverpassTags {
    opening_hours: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: Option<OverpassTags>,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

impl HttpConditionsProvider {
    /// Create a provider with the given fallback speed, detour factor, and
    /// per-request timeout.
    #[must_use]
    pub fn new(avg_speed_kmh: f64, road_detour_factor: f64, timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(format!("trailplan/{} (external conditions)", crate::VERSION))
            .build();
        let client = match client {
            Ok(c) => Some(c),
            Err(e) => {
                warn!(error = %e, "HTTP client unavailable, running fully offline");
                None
            }
        };
        Self {
            client,
            offline: OfflineConditionsProvider::new(avg_speed_kmh),
            avg_speed_kmh,
            road_detour_factor,
        }
    }

    /// Offline estimate with the road-detour factor applied
    fn fallback_leg(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> DrivingLeg {
        let distance_km = haversine_km(lat1, lon1, lat2, lon2) * self.road_detour_factor;
        let minutes = (distance_km / self.avg_speed_kmh * 60.0).round();
        DrivingLeg {
            distance_km,
            duration_min: if minutes > 0.0 { minutes as u32 } else { 0 },
        }
    }

    fn try_driving_leg(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> anyhow::Result<DrivingLeg> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no HTTP client"))?;
        let url = format!("{OSRM_BASE_URL}/{lon1},{lat1};{lon2},{lat2}");
        let response: OsrmResponse = client
            .get(&url)
            .query(&[("overview", "false")])
            .send()?
            .error_for_status()?
            .json()?;
        let route = response
            .routes
            .first()
            .ok_or_else(|| anyhow::anyhow!("no routes in OSRM response"))?;
        let minutes = (route.duration / 60.0).round();
        Ok(DrivingLeg {
            distance_km: route.distance / 1000.0,
            duration_min: if minutes > 0.0 { minutes as u32 } else { 0 },
        })
    }

    fn try_weather_now(&self, lat: f64, lon: f64) -> anyhow::Result<WeatherNow> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no HTTP client"))?;
        let response: OpenMeteoResponse = client
            .get(OPEN_METEO_URL)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", "temperature_2m,wind_speed_10m".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        let current = response.current.unwrap_or(OpenMeteoCurrent {
            temperature: None,
            wind_speed: None,
        });
        Ok(WeatherNow {
            temperature_c: current.temperature,
            wind_speed_ms: current.wind_speed.map(|kmh| kmh / 3.6),
        })
    }

    fn try_place_info(&self, lat: f64, lon: f64) -> anyhow::Result<PlaceInfo> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no HTTP client"))?;
        let query = format!(
            "[out:json][timeout:10];node(around:1500,{lat},{lon})[\"opening_hours\"];out tags 1;"
        );
        let response: OverpassResponse = client
            .post(OVERPASS_URL)
            .body(format!("data={}", urlencoding::encode(&query)))
            .send()?
            .error_for_status()?
            .json()?;
        let opening_hours = response
            .elements
            .into_iter()
            .filter_map(|e| e.tags.and_then(|t| t.opening_hours))
            .next();
        Ok(PlaceInfo { opening_hours })
    }
}

impl ExternalConditionsProvider for HttpConditionsProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    fn driving_leg(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> DrivingLeg {
        match self.try_driving_leg(lat1, lon1, lat2, lon2) {
            Ok(leg) => leg,
            Err(e) => {
                warn!(error = %e, "OSRM leg failed, using offline estimate");
                self.fallback_leg(lat1, lon1, lat2, lon2)
            }
        }
    }

    fn weather_now(&self, lat: f64, lon: f64) -> WeatherNow {
        match self.try_weather_now(lat, lon) {
            Ok(weather) => weather,
            Err(e) => {
                warn!(error = %e, "Open-Meteo lookup failed, reporting no weather");
                self.offline.weather_now(lat, lon)
            }
        }
    }

    fn place_info(&self, lat: f64, lon: f64) -> PlaceInfo {
        match self.try_place_info(lat, lon) {
            Ok(place) => place,
            Err(e) => {
                warn!(error = %e, "Overpass lookup failed, reporting no place info");
                self.offline.place_info(lat, lon)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_leg_applies_detour_factor() {
        let provider = HttpConditionsProvider::new(60.0, 1.25, 1);
        let straight = haversine_km(0.0, 0.0, 0.0, 1.0);
        let leg = provider.fallback_leg(0.0, 0.0, 0.0, 1.0);
        assert!((leg.distance_km - straight * 1.25).abs() < 1e-9);
        assert!(leg.duration_min > 0);
    }

    #[test]
    fn test_osrm_response_parsing() {
        let json = r#"{"routes":[{"distance":12500.0,"duration":900.0}]}"#;
        let response: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0].distance, 12500.0);
    }

    #[test]
    fn test_open_meteo_wind_units_are_converted() {
        let json = r#"{"current":{"temperature_2m":21.5,"wind_speed_10m":36.0}}"#;
        let response: OpenMeteoResponse = serde_json::from_str(json).unwrap();
        let current = response.current.unwrap();
        assert_eq!(current.wind_speed.map(|kmh| kmh / 3.6), Some(10.0));
        assert_eq!(current.temperature, Some(21.5));
    }
}
