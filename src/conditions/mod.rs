//! External conditions: driving legs, current weather, and place info
//!
//! The planner talks to one `ExternalConditionsProvider`, selected from
//! configuration at construction time. The offline implementation is always
//! available and computes everything from great-circle distance; the HTTP
//! implementation queries public services and substitutes the offline
//! computation on any failure, so nothing ever propagates out of this
//! interface as an error.

mod http;
mod offline;

pub use http::HttpConditionsProvider;
pub use offline::OfflineConditionsProvider;

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::Itinerary;

/// One driving leg between two consecutive geo-located visits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingLeg {
    /// Road (or great-circle) distance in kilometres
    pub distance_km: f64,
    /// Estimated driving time in minutes
    pub duration_min: u32,
}

/// Current weather at a point, when the provider has any
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherNow {
    pub temperature_c: Option<f64>,
    pub wind_speed_ms: Option<f64>,
}

/// Place details at a point, when the provider has any
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub opening_hours: Option<String>,
}

/// Conditions for one visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitConditions {
    pub visit_id: u64,
    pub weather: WeatherNow,
    pub place: PlaceInfo,
}

/// Driving leg between two consecutive visits of the same day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegConditions {
    pub day_number: u32,
    pub from_visit: u64,
    pub to_visit: u64,
    pub leg: DrivingLeg,
}

/// Aggregate conditions for a whole itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditions {
    pub visits: Vec<VisitConditions>,
    pub legs: Vec<LegConditions>,
    /// Name of the provider that produced the data
    pub provider: String,
}

/// Pluggable source of travel conditions.
///
/// Implementations must never fail out of this interface: a provider that
/// cannot reach its backing service degrades to offline estimates instead.
pub trait ExternalConditionsProvider: Send + Sync {
    /// Short provider name for logs and presentation
    fn name(&self) -> &'static str;

    /// Driving distance and time between two coordinate pairs
    fn driving_leg(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> DrivingLeg;

    /// Current weather at a coordinate pair
    fn weather_now(&self, lat: f64, lon: f64) -> WeatherNow;

    /// Place details at a coordinate pair
    fn place_info(&self, lat: f64, lon: f64) -> PlaceInfo;

    /// Per-visit weather and place data plus legs between consecutive
    /// geo-located visits of the same day.
    fn conditions(&self, itinerary: &Itinerary) -> Conditions {
        let mut visits = Vec::new();
        let mut legs = Vec::new();

        for day in &itinerary.days {
            let mut prev: Option<(&crate::models::Visit, (f64, f64))> = None;
            for visit in &day.visits {
                let coords = visit.poi.coordinates();

                let (weather, place) = match coords {
                    Some((lat, lon)) => (self.weather_now(lat, lon), self.place_info(lat, lon)),
                    None => (WeatherNow::default(), PlaceInfo::default()),
                };
                visits.push(VisitConditions {
                    visit_id: visit.id,
                    weather,
                    place,
                });

                if let Some((lat, lon)) = coords {
                    if let Some((from, (lat1, lon1))) = prev {
                        legs.push(LegConditions {
                            day_number: day.day_number,
                            from_visit: from.id,
                            to_visit: visit.id,
                            leg: self.driving_leg(lat1, lon1, lat, lon),
                        });
                    }
                    prev = Some((visit, (lat, lon)));
                }
            }
        }

        Conditions {
            visits,
            legs,
            provider: self.name().to_string(),
        }
    }
}

/// Select the provider implementation from configuration.
///
/// This is a construction-time strategy choice, not a runtime type check.
#[must_use]
pub fn provider_from_config(config: &PlannerConfig) -> Box<dyn ExternalConditionsProvider> {
    match config.provider.kind.trim().to_lowercase().as_str() {
        "http" | "real" | "real_http" => Box::new(HttpConditionsProvider::new(
            config.provider.avg_speed_kmh,
            config.provider.road_detour_factor,
            config.provider.timeout_seconds,
        )),
        _ => Box::new(OfflineConditionsProvider::new(config.provider.avg_speed_kmh)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Poi, PoiCategory, Visit};

    fn itinerary_with_day(visits: Vec<Visit>) -> Itinerary {
        let mut it = Itinerary::new("u", "t", 1);
        it.day_mut(1).unwrap().visits = visits;
        it.day_mut(1).unwrap().reindex();
        it
    }

    fn geo_visit(id: u64, lat: f64, lon: f64) -> Visit {
        Visit {
            id,
            poi: Poi::new(id, format!("P{id}"), PoiCategory::Nature).with_coordinates(lat, lon),
            day_number: 1,
            order_index: 1,
            duration_hours: 2.0,
            note: None,
        }
    }

    fn plain_visit(id: u64) -> Visit {
        Visit {
            id,
            poi: Poi::new(id, format!("N{id}"), PoiCategory::Food),
            day_number: 1,
            order_index: 1,
            duration_hours: 1.0,
            note: None,
        }
    }

    #[test]
    fn test_conditions_pair_consecutive_geo_visits() {
        let provider = OfflineConditionsProvider::default();
        let it = itinerary_with_day(vec![
            geo_visit(1, 51.7, 94.4),
            plain_visit(2),
            geo_visit(3, 51.9, 94.6),
        ]);

        let conditions = provider.conditions(&it);
        assert_eq!(conditions.visits.len(), 3);
        // the coordinate-less visit does not sever the chain
        assert_eq!(conditions.legs.len(), 1);
        assert_eq!(conditions.legs[0].from_visit, 1);
        assert_eq!(conditions.legs[0].to_visit, 3);
        assert_eq!(conditions.provider, "offline");
    }

    #[test]
    fn test_conditions_do_not_pair_across_days() {
        let provider = OfflineConditionsProvider::default();
        let mut it = Itinerary::new("u", "t", 2);
        it.day_mut(1).unwrap().visits = vec![geo_visit(1, 51.7, 94.4)];
        let mut v2 = geo_visit(2, 51.9, 94.6);
        v2.day_number = 2;
        it.day_mut(2).unwrap().visits = vec![v2];

        let conditions = provider.conditions(&it);
        assert!(conditions.legs.is_empty());
    }
}
