//! Per-day and aggregate travel distance and time
//!
//! Logistics distinguishes "nothing computed" from "zero distance": a day
//! with fewer than two geo-located visits yields `None` for both fields,
//! never `0`, and itinerary totals stay `None` when no day produced a leg.

use tracing::debug;

use crate::conditions::ExternalConditionsProvider;
use crate::models::{DayPlan, Itinerary};

/// Travel stats of one day; both fields are `None` when the day produced no legs
#[derive(Debug, Clone, PartialEq)]
pub struct DayLogistics {
    pub day_number: u32,
    pub distance_km: Option<f64>,
    pub duration_min: Option<u32>,
}

/// Travel stats of a whole itinerary
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryLogistics {
    pub days: Vec<DayLogistics>,
    /// Sum over days that produced at least one leg; `None` when none did
    pub total_distance_km: Option<f64>,
    pub total_duration_min: Option<u32>,
}

/// Compute one day's travel stats.
///
/// Legs join consecutive geo-located visits in day order; a visit without
/// coordinates contributes no leg but does not sever the chain around it.
pub fn compute_day_logistics(
    day: &DayPlan,
    provider: &dyn ExternalConditionsProvider,
) -> DayLogistics {
    let coords: Vec<(f64, f64)> = day
        .visits
        .iter()
        .filter_map(|v| v.poi.coordinates())
        .collect();

    if coords.len() < 2 {
        return DayLogistics {
            day_number: day.day_number,
            distance_km: None,
            duration_min: None,
        };
    }

    let mut distance_km = 0.0;
    let mut duration_min: u32 = 0;
    for pair in coords.windows(2) {
        let (lat1, lon1) = pair[0];
        let (lat2, lon2) = pair[1];
        let leg = provider.driving_leg(lat1, lon1, lat2, lon2);
        distance_km += leg.distance_km;
        duration_min += leg.duration_min;
    }

    DayLogistics {
        day_number: day.day_number,
        distance_km: Some(distance_km),
        duration_min: Some(duration_min),
    }
}

/// Compute travel stats for every day plus itinerary totals
pub fn compute_logistics(
    itinerary: &Itinerary,
    provider: &dyn ExternalConditionsProvider,
) -> ItineraryLogistics {
    let days: Vec<DayLogistics> = itinerary
        .days
        .iter()
        .map(|day| compute_day_logistics(day, provider))
        .collect();

    let mut total_distance_km: Option<f64> = None;
    let mut total_duration_min: Option<u32> = None;
    for day in &days {
        if let (Some(km), Some(min)) = (day.distance_km, day.duration_min) {
            total_distance_km = Some(total_distance_km.unwrap_or(0.0) + km);
            total_duration_min = Some(total_duration_min.unwrap_or(0) + min);
        }
    }

    debug!(
        days = days.len(),
        total_km = ?total_distance_km,
        provider = provider.name(),
        "computed itinerary logistics"
    );
    ItineraryLogistics {
        days,
        total_distance_km,
        total_duration_min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::OfflineConditionsProvider;
    use crate::models::{Poi, PoiCategory, Visit};

    fn geo_visit(id: u64, lat: f64, lon: f64) -> Visit {
        Visit {
            id,
            poi: Poi::new(id, format!("P{id}"), PoiCategory::Nature).with_coordinates(lat, lon),
            day_number: 1,
            order_index: id as u32,
            duration_hours: 2.0,
            note: None,
        }
    }

    fn plain_visit(id: u64) -> Visit {
        Visit {
            id,
            poi: Poi::new(id, format!("N{id}"), PoiCategory::Food),
            day_number: 1,
            order_index: id as u32,
            duration_hours: 1.0,
            note: None,
        }
    }

    fn day_of(visits: Vec<Visit>) -> DayPlan {
        let mut day = DayPlan::new(1);
        day.visits = visits;
        day.reindex();
        day
    }

    #[test]
    fn test_day_with_no_geo_visits_is_undetermined() {
        let provider = OfflineConditionsProvider::default();
        let stats = compute_day_logistics(&day_of(vec![plain_visit(1), plain_visit(2)]), &provider);
        assert_eq!(stats.distance_km, None);
        assert_eq!(stats.duration_min, None);
    }

    #[test]
    fn test_day_with_one_geo_visit_is_undetermined_not_zero() {
        let provider = OfflineConditionsProvider::default();
        let stats = compute_day_logistics(&day_of(vec![geo_visit(1, 51.7, 94.4)]), &provider);
        assert_eq!(stats.distance_km, None);
        assert_eq!(stats.duration_min, None);
    }

    #[test]
    fn test_legs_skip_coordinate_less_visits_without_breaking_the_chain() {
        let provider = OfflineConditionsProvider::default();
        let with_gap = day_of(vec![
            geo_visit(1, 0.0, 0.0),
            plain_visit(9),
            geo_visit(2, 0.0, 1.0),
        ]);
        let without_gap = day_of(vec![geo_visit(1, 0.0, 0.0), geo_visit(2, 0.0, 1.0)]);

        let a = compute_day_logistics(&with_gap, &provider);
        let b = compute_day_logistics(&without_gap, &provider);
        assert_eq!(a.distance_km, b.distance_km);
        assert_eq!(a.duration_min, b.duration_min);
        assert!(a.distance_km.unwrap() > 100.0);
    }

    #[test]
    fn test_totals_sum_only_determined_days() {
        let provider = OfflineConditionsProvider::default();
        let mut it = Itinerary::new("u", "t", 2);
        it.day_mut(1).unwrap().visits = vec![geo_visit(1, 0.0, 0.0), geo_visit(2, 0.0, 1.0)];
        it.day_mut(2).unwrap().visits = vec![plain_visit(3)];

        let stats = compute_logistics(&it, &provider);
        assert_eq!(stats.days[1].distance_km, None);
        assert!(stats.total_distance_km.unwrap() > 100.0);
        assert!(stats.total_duration_min.unwrap() > 100);
    }

    #[test]
    fn test_totals_undetermined_when_no_day_has_legs() {
        let provider = OfflineConditionsProvider::default();
        let mut it = Itinerary::new("u", "t", 2);
        it.day_mut(1).unwrap().visits = vec![geo_visit(1, 51.7, 94.4)];
        it.day_mut(2).unwrap().visits = vec![plain_visit(2)];

        let stats = compute_logistics(&it, &provider);
        assert_eq!(stats.total_distance_km, None);
        assert_eq!(stats.total_duration_min, None);
    }
}
