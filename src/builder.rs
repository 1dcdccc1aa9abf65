//! Greedy construction of an itinerary from a ranked POI sequence
//!
//! The builder is intentionally myopic: a single forward pass packs POIs
//! into 8-hour days in ranking order, never reconsidering or swapping a
//! placement once a day is full. Quality comes entirely from the upstream
//! ranking, not from search.

use tracing::{debug, info};

use crate::error::PlannerError;
use crate::models::{Itinerary, Poi, TravelerProfile, Visit};
use crate::scoring;
use crate::Result;

/// Maximum accumulated visit hours per day
pub const DAY_CAP_HOURS: f64 = 8.0;

/// Upper bound on the number of days an itinerary can span
pub const MAX_DAYS_COUNT: u32 = 30;

/// Validated inputs of one build
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Number of days to plan, 1..=30
    pub days_count: u32,
    /// Budget ceiling; the pass stops once the running cost exceeds it
    pub max_budget: Option<u32>,
}

impl BuildRequest {
    /// Validate the raw request; rejected before any state is touched
    pub fn validate(&self) -> Result<()> {
        if self.days_count < 1 || self.days_count > MAX_DAYS_COUNT {
            return Err(PlannerError::validation(format!(
                "days_count must be between 1 and {MAX_DAYS_COUNT}, got {}",
                self.days_count
            )));
        }
        Ok(())
    }
}

/// Build an itinerary by greedily packing ranked POIs into day-bounded,
/// budget-bounded visits.
///
/// With a profile the pool is filtered and ranked by preference; without
/// one it is ordered by rating and cost only. Each candidate either fits
/// the current day or opens the next one; once the day counter passes
/// `days_count` the pass ends and remaining POIs are discarded, not
/// deferred. The budget check runs after an insertion, so the visit that
/// overflows the budget stays in the plan.
pub fn build_itinerary(
    pool: &[Poi],
    profile: Option<&TravelerProfile>,
    request: &BuildRequest,
    owner: &str,
    name: &str,
) -> Result<Itinerary> {
    request.validate()?;

    let ranked = match profile {
        Some(p) => scoring::rank_pois(pool, p),
        None => scoring::rank_unfiltered(pool),
    };

    let mut itinerary = Itinerary::new(owner, name, request.days_count);

    let mut current_day: u32 = 1;
    let mut current_day_hours = 0.0;
    let mut next_order_index: u32 = 1;
    let mut running_cost: u32 = 0;

    for poi in ranked {
        let duration = poi.visit_hours();

        if current_day_hours + duration > DAY_CAP_HOURS {
            current_day += 1;
            current_day_hours = 0.0;
            next_order_index = 1;
            if current_day > request.days_count {
                debug!(day = current_day, "day budget exhausted, stopping pass");
                break;
            }
        }

        let visit = Visit {
            id: itinerary.next_visit_id(),
            day_number: current_day,
            order_index: next_order_index,
            duration_hours: duration,
            note: None,
            poi,
        };
        if let Some(cost) = visit.poi.base_cost {
            if cost > 0 {
                running_cost = running_cost.saturating_add(cost);
            }
        }
        if let Some(day) = itinerary.day_mut(current_day) {
            day.visits.push(visit);
        }
        next_order_index += 1;
        current_day_hours += duration;

        if let Some(max_budget) = request.max_budget {
            if running_cost > max_budget {
                debug!(running_cost, max_budget, "budget exceeded, stopping pass");
                break;
            }
        }
    }

    itinerary.recalc_totals();
    info!(
        owner,
        days = itinerary.days_count,
        visits = itinerary.visit_count(),
        total_hours = itinerary.total_duration_hours,
        "built itinerary"
    );
    Ok(itinerary)
}
