//! Itinerary, day plan, and visit models
//!
//! The itinerary keeps its derived totals in sync itself: every structural
//! mutation in the builder and editor finishes with `recalc_totals`, so the
//! lazy fields are never stale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::poi::Poi;

/// One scheduled appearance of a POI within a specific day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    /// Identifier unique within the owning itinerary
    pub id: u64,
    /// Snapshot of the visited POI
    pub poi: Poi,
    /// Day this visit belongs to, 1..=days_count
    pub day_number: u32,
    /// Position within the day, 1..=N contiguous
    pub order_index: u32,
    /// Planned time at the POI in hours; copied from the POI at creation
    /// and independently adjustable afterwards
    pub duration_hours: f64,
    /// Free-text note
    pub note: Option<String>,
}

/// Ordered visits of a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day number, 1..=days_count
    pub day_number: u32,
    /// Visits sorted by `order_index`
    pub visits: Vec<Visit>,
}

impl DayPlan {
    /// Create an empty day
    #[must_use]
    pub fn new(day_number: u32) -> Self {
        Self {
            day_number,
            visits: Vec::new(),
        }
    }

    /// Rewrite order indices as the contiguous run 1..=N in current sequence order
    pub fn reindex(&mut self) {
        for (idx, visit) in self.visits.iter_mut().enumerate() {
            visit.order_index = idx as u32 + 1;
        }
    }

    /// Accumulated visit hours of the day
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.visits.iter().map(|v| v.duration_hours).sum()
    }
}

/// A planned multi-day trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    /// Store identifier; 0 until persisted
    pub id: u64,
    /// Owning user
    pub owner: String,
    /// Display name
    pub name: String,
    /// Number of days the trip spans
    pub days_count: u32,
    /// Day plans for days 1..=days_count, in day order
    pub days: Vec<DayPlan>,
    /// Sum of all visit durations in hours; derived, never stale
    pub total_duration_hours: f64,
    /// Sum of nonzero POI base costs; `None` (undefined, not zero) when no
    /// visited POI contributes a cost
    pub total_cost: Option<u32>,
    /// Rendered equipment checklist
    pub equipment: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Next visit id to hand out
    next_visit_id: u64,
}

impl Itinerary {
    /// Create an empty itinerary with one day plan per day
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>, days_count: u32) -> Self {
        Self {
            id: 0,
            owner: owner.into(),
            name: name.into(),
            days_count,
            days: (1..=days_count).map(DayPlan::new).collect(),
            total_duration_hours: 0.0,
            total_cost: None,
            equipment: String::new(),
            created_at: Utc::now(),
            next_visit_id: 1,
        }
    }

    /// Hand out a fresh visit id
    pub fn next_visit_id(&mut self) -> u64 {
        let id = self.next_visit_id;
        self.next_visit_id += 1;
        id
    }

    /// Day plan by day number
    #[must_use]
    pub fn day(&self, day_number: u32) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    /// Mutable day plan by day number
    pub fn day_mut(&mut self, day_number: u32) -> Option<&mut DayPlan> {
        self.days.iter_mut().find(|d| d.day_number == day_number)
    }

    /// All visits in day order, then order-index order
    pub fn visits(&self) -> impl Iterator<Item = &Visit> {
        self.days.iter().flat_map(|d| d.visits.iter())
    }

    /// Visit by id, with its day number
    #[must_use]
    pub fn find_visit(&self, visit_id: u64) -> Option<&Visit> {
        self.visits().find(|v| v.id == visit_id)
    }

    /// Total number of visits across all days
    #[must_use]
    pub fn visit_count(&self) -> usize {
        self.days.iter().map(|d| d.visits.len()).sum()
    }

    /// Recompute the derived totals from the current visit set.
    ///
    /// Duration is the plain sum of visit durations. Cost counts only POIs
    /// carrying a defined, nonzero base cost and stays `None` when that sum
    /// is zero: "no cost information" and "free trip" are different answers
    /// and downstream rendering depends on telling them apart.
    pub fn recalc_totals(&mut self) {
        let mut total_hours = 0.0;
        let mut total_cost: u32 = 0;

        for visit in self.visits() {
            total_hours += visit.duration_hours;
            if let Some(cost) = visit.poi.base_cost {
                if cost > 0 {
                    total_cost = total_cost.saturating_add(cost);
                }
            }
        }

        self.total_duration_hours = total_hours;
        self.total_cost = if total_cost > 0 {
            Some(total_cost)
        } else {
            None
        };
    }
}
