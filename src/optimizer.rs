//! Nearest-neighbor reordering of a day's visits
//!
//! The optimizer shortens a day's travel by walking the geo-located visits
//! greedily from the first one, always hopping to the closest unvisited
//! point. Visits without coordinates keep their original slots, so the
//! interleaving of geo and non-geo visits is preserved. It never creates,
//! deletes, or moves a visit across days.

use tracing::debug;

use crate::geo::haversine_km;
use crate::models::{DayPlan, Itinerary, Visit};

fn visit_coords(visit: &Visit) -> Option<(f64, f64)> {
    visit.poi.coordinates()
}

fn dist_km(a: &Visit, b: &Visit) -> f64 {
    // callers guarantee both visits carry coordinates
    let (lat1, lon1) = visit_coords(a).unwrap_or((0.0, 0.0));
    let (lat2, lon2) = visit_coords(b).unwrap_or((0.0, 0.0));
    haversine_km(lat1, lon1, lat2, lon2)
}

/// Nearest-neighbor tour over the geo-located visits, starting at the first
/// one in original order. Exact distance ties keep the earliest remaining
/// candidate, which makes the construction deterministic and idempotent.
fn nearest_neighbor_order(mut remaining: Vec<Visit>) -> Vec<Visit> {
    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(0));

    while !remaining.is_empty() {
        let current = ordered.last().map(|v| v.clone());
        let current = match current {
            Some(v) => v,
            None => break,
        };
        let mut best_i = 0;
        let mut best_d = f64::INFINITY;
        for (i, candidate) in remaining.iter().enumerate() {
            let d = dist_km(&current, candidate);
            if d < best_d {
                best_d = d;
                best_i = i;
            }
        }
        ordered.push(remaining.remove(best_i));
    }

    ordered
}

/// Reorder one day's visits by the nearest-neighbor heuristic.
///
/// With two or fewer geo-located visits every ordering has identical total
/// distance, so the day is left untouched by definition. Otherwise the
/// reordered geo visits are merged back into the slots geo visits occupied
/// originally and the whole day is renumbered 1..=N.
pub fn optimize_day(day: &mut DayPlan) {
    let geo_count = day.visits.iter().filter(|v| visit_coords(v).is_some()).count();
    if geo_count <= 2 {
        return;
    }

    let geo_visits: Vec<Visit> = day
        .visits
        .iter()
        .filter(|v| visit_coords(v).is_some())
        .cloned()
        .collect();
    let mut ordered_geo = nearest_neighbor_order(geo_visits).into_iter();

    let merged: Vec<Visit> = day
        .visits
        .iter()
        .map(|v| {
            if visit_coords(v).is_some() {
                // slot count matches the geo visit count by construction
                ordered_geo.next().unwrap_or_else(|| v.clone())
            } else {
                v.clone()
            }
        })
        .collect();

    day.visits = merged;
    day.reindex();
    debug!(day = day.day_number, geo = geo_count, "optimized day route");
}

/// Optimize every day of an itinerary in place
pub fn optimize_itinerary(itinerary: &mut Itinerary) {
    for day in &mut itinerary.days {
        optimize_day(day);
    }
}
