//! Incremental mutation of an existing itinerary
//!
//! Every operation re-establishes the builder's contracts before it
//! returns: contiguous order indices within each touched day and fresh
//! derived totals. Operations validate first and only then mutate, so a
//! failing call leaves the itinerary exactly as it was.

use tracing::debug;

use crate::error::PlannerError;
use crate::models::{Itinerary, Poi, Visit};
use crate::Result;

/// Day number and position of a visit within its day
fn locate(itinerary: &Itinerary, visit_id: u64) -> Result<(u32, usize)> {
    for day in &itinerary.days {
        if let Some(pos) = day.visits.iter().position(|v| v.id == visit_id) {
            return Ok((day.day_number, pos));
        }
    }
    Err(PlannerError::not_found(format!("visit {visit_id}")))
}

/// Append a visit for `poi` at the end of a day.
///
/// Returns the new visit's id.
pub fn add_visit(
    itinerary: &mut Itinerary,
    poi: Poi,
    day_number: u32,
    note: Option<String>,
) -> Result<u64> {
    if day_number < 1 || day_number > itinerary.days_count {
        return Err(PlannerError::validation(format!(
            "day {day_number} is outside 1..={}",
            itinerary.days_count
        )));
    }

    let visit_id = itinerary.next_visit_id();
    let duration_hours = poi.visit_hours();
    let day = itinerary
        .day_mut(day_number)
        .ok_or_else(|| PlannerError::not_found(format!("day {day_number}")))?;
    let order_index = day.visits.len() as u32 + 1;
    day.visits.push(Visit {
        id: visit_id,
        poi,
        day_number,
        order_index,
        duration_hours,
        note,
    });

    itinerary.recalc_totals();
    debug!(visit_id, day_number, "added visit");
    Ok(visit_id)
}

/// Remove a visit, closing the gap in its day's order indices
pub fn remove_visit(itinerary: &mut Itinerary, visit_id: u64) -> Result<()> {
    let (day_number, pos) = locate(itinerary, visit_id)?;
    if let Some(day) = itinerary.day_mut(day_number) {
        day.visits.remove(pos);
        day.reindex();
    }
    itinerary.recalc_totals();
    debug!(visit_id, day_number, "removed visit");
    Ok(())
}

/// Swap a visit with its predecessor in the same day.
///
/// Returns false without changing anything when the visit is already first.
pub fn move_visit_up(itinerary: &mut Itinerary, visit_id: u64) -> Result<bool> {
    let (day_number, pos) = locate(itinerary, visit_id)?;
    if pos == 0 {
        return Ok(false);
    }
    if let Some(day) = itinerary.day_mut(day_number) {
        day.visits.swap(pos - 1, pos);
        day.reindex();
    }
    Ok(true)
}

/// Swap a visit with its successor in the same day.
///
/// Returns false without changing anything when the visit is already last.
pub fn move_visit_down(itinerary: &mut Itinerary, visit_id: u64) -> Result<bool> {
    let (day_number, pos) = locate(itinerary, visit_id)?;
    let last = match itinerary.day(day_number) {
        Some(day) => day.visits.len() - 1,
        None => return Ok(false),
    };
    if pos >= last {
        return Ok(false);
    }
    if let Some(day) = itinerary.day_mut(day_number) {
        day.visits.swap(pos, pos + 1);
        day.reindex();
    }
    Ok(true)
}

/// Move a visit to the end of another day, reindexing both days
pub fn move_visit_to_day(itinerary: &mut Itinerary, visit_id: u64, new_day: u32) -> Result<()> {
    if new_day < 1 || new_day > itinerary.days_count {
        return Err(PlannerError::validation(format!(
            "day {new_day} is outside 1..={}",
            itinerary.days_count
        )));
    }
    let (old_day, pos) = locate(itinerary, visit_id)?;
    if old_day == new_day {
        return Ok(());
    }

    let mut visit = match itinerary.day_mut(old_day) {
        Some(day) => {
            let visit = day.visits.remove(pos);
            day.reindex();
            visit
        }
        None => return Err(PlannerError::not_found(format!("day {old_day}"))),
    };

    let day = itinerary
        .day_mut(new_day)
        .ok_or_else(|| PlannerError::not_found(format!("day {new_day}")))?;
    visit.day_number = new_day;
    visit.order_index = day.visits.len() as u32 + 1;
    day.visits.push(visit);

    debug!(visit_id, old_day, new_day, "moved visit across days");
    Ok(())
}

/// Replace a visit's note
pub fn set_visit_note(itinerary: &mut Itinerary, visit_id: u64, note: Option<String>) -> Result<()> {
    let (day_number, pos) = locate(itinerary, visit_id)?;
    if let Some(day) = itinerary.day_mut(day_number) {
        if let Some(visit) = day.visits.get_mut(pos) {
            visit.note = note;
        }
    }
    Ok(())
}

/// Adjust a visit's planned duration independently of its POI
pub fn set_visit_duration(itinerary: &mut Itinerary, visit_id: u64, hours: f64) -> Result<()> {
    if !(hours > 0.0) {
        return Err(PlannerError::validation(format!(
            "visit duration must be positive, got {hours}"
        )));
    }
    let (day_number, pos) = locate(itinerary, visit_id)?;
    if let Some(day) = itinerary.day_mut(day_number) {
        if let Some(visit) = day.visits.get_mut(pos) {
            visit.duration_hours = hours;
        }
    }
    itinerary.recalc_totals();
    Ok(())
}
