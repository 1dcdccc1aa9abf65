//! Itinerary generation entrypoint and facade over the pipeline
//!
//! The `Planner` owns the itinerary store and the conditions provider and
//! wires the pipeline together: rank, pack, optimize each day, attach the
//! equipment checklist, persist. Edits re-invoke the same reindex and
//! recalculation contracts the builder establishes, each under the store's
//! per-itinerary critical section.

use tracing::info;

use crate::builder::{build_itinerary, BuildRequest, MAX_DAYS_COUNT};
use crate::conditions::{provider_from_config, Conditions, ExternalConditionsProvider};
use crate::config::PlannerConfig;
use crate::editing;
use crate::equipment;
use crate::error::PlannerError;
use crate::logistics::{compute_logistics, ItineraryLogistics};
use crate::models::{Itinerary, Poi, TravelerProfile};
use crate::optimizer::optimize_itinerary;
use crate::store::{InMemoryItineraryStore, ItineraryStore};
use crate::Result;

/// Raw, unvalidated generation inputs as the presentation layer hands them in
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Number of days, must end up in 1..=30
    pub days_count: i64,
    /// Budget ceiling, must be non-negative when present
    pub max_budget: Option<i64>,
    /// Display name for the new itinerary
    pub name: String,
}

impl GenerateRequest {
    /// Validate the raw inputs into a build request.
    ///
    /// Runs before any state is touched.
    pub fn into_build_request(self) -> Result<BuildRequest> {
        if self.days_count < 1 || self.days_count > i64::from(MAX_DAYS_COUNT) {
            return Err(PlannerError::validation(format!(
                "days_count must be between 1 and {MAX_DAYS_COUNT}, got {}",
                self.days_count
            )));
        }
        let max_budget = match self.max_budget {
            Some(b) if b < 0 => {
                return Err(PlannerError::validation(format!(
                    "max_budget must be non-negative, got {b}"
                )))
            }
            // anything past u32::MAX cannot constrain the pass anyway
            Some(b) => Some(u32::try_from(b).unwrap_or(u32::MAX)),
            None => None,
        };
        Ok(BuildRequest {
            days_count: self.days_count as u32,
            max_budget,
        })
    }
}

/// Facade over the itinerary pipeline, store, and conditions provider
pub struct Planner {
    store: InMemoryItineraryStore,
    provider: Box<dyn ExternalConditionsProvider>,
}

impl Planner {
    /// Build a planner from configuration; the provider is chosen here,
    /// once, and never by runtime type inspection.
    #[must_use]
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            store: InMemoryItineraryStore::new(),
            provider: provider_from_config(config),
        }
    }

    /// Build a planner around an explicit provider
    #[must_use]
    pub fn with_provider(provider: Box<dyn ExternalConditionsProvider>) -> Self {
        Self {
            store: InMemoryItineraryStore::new(),
            provider,
        }
    }

    /// Generate, optimize, and persist a new itinerary.
    ///
    /// Returns the stored snapshot or a validation failure; there is no
    /// other side channel.
    pub fn generate(
        &self,
        owner: &str,
        pool: &[Poi],
        profile: Option<&TravelerProfile>,
        request: GenerateRequest,
    ) -> Result<Itinerary> {
        let name = request.name.clone();
        let build_request = request.into_build_request()?;

        let mut itinerary = build_itinerary(pool, profile, &build_request, owner, &name)?;
        optimize_itinerary(&mut itinerary);
        refresh_equipment(&mut itinerary, profile);

        let id = self.store.insert(itinerary)?;
        let stored = self.store.get(owner, id)?;
        info!(owner, id, visits = stored.visit_count(), "generated itinerary");
        Ok(stored)
    }

    /// Snapshot of one itinerary
    pub fn itinerary(&self, owner: &str, id: u64) -> Result<Itinerary> {
        self.store.get(owner, id)
    }

    /// All itineraries of one owner, newest first
    pub fn list(&self, owner: &str) -> Result<Vec<Itinerary>> {
        self.store.list(owner)
    }

    /// Delete one itinerary
    pub fn delete(&self, owner: &str, id: u64) -> Result<()> {
        self.store.delete(owner, id)
    }

    /// Per-day and total travel stats for one itinerary
    pub fn logistics(&self, owner: &str, id: u64) -> Result<ItineraryLogistics> {
        let itinerary = self.store.get(owner, id)?;
        Ok(compute_logistics(&itinerary, self.provider.as_ref()))
    }

    /// Aggregate per-visit weather/place data and per-pair legs
    pub fn conditions(&self, owner: &str, id: u64) -> Result<Conditions> {
        let itinerary = self.store.get(owner, id)?;
        Ok(self.provider.conditions(&itinerary))
    }

    /// Re-run the day-route optimizer over a stored itinerary
    pub fn optimize(&self, owner: &str, id: u64) -> Result<Itinerary> {
        self.store.update(owner, id, &mut |it| {
            optimize_itinerary(it);
            Ok(())
        })
    }

    /// Append a visit to a day of a stored itinerary.
    ///
    /// The profile, when available, keeps the refreshed checklist aware of
    /// season preference and children.
    pub fn add_visit(
        &self,
        owner: &str,
        id: u64,
        poi: &Poi,
        day_number: u32,
        note: Option<String>,
        profile: Option<&TravelerProfile>,
    ) -> Result<Itinerary> {
        self.update_with_equipment(owner, id, profile, &mut |it| {
            editing::add_visit(it, poi.clone(), day_number, note.clone()).map(|_| ())
        })
    }

    /// Remove a visit from a stored itinerary
    pub fn remove_visit(
        &self,
        owner: &str,
        id: u64,
        visit_id: u64,
        profile: Option<&TravelerProfile>,
    ) -> Result<Itinerary> {
        self.update_with_equipment(owner, id, profile, &mut |it| {
            editing::remove_visit(it, visit_id)
        })
    }

    /// Swap a visit with its predecessor within its day
    pub fn move_visit_up(&self, owner: &str, id: u64, visit_id: u64) -> Result<Itinerary> {
        self.store
            .update(owner, id, &mut |it| editing::move_visit_up(it, visit_id).map(|_| ()))
    }

    /// Swap a visit with its successor within its day
    pub fn move_visit_down(&self, owner: &str, id: u64, visit_id: u64) -> Result<Itinerary> {
        self.store
            .update(owner, id, &mut |it| editing::move_visit_down(it, visit_id).map(|_| ()))
    }

    /// Move a visit to the end of another day
    pub fn move_visit_to_day(
        &self,
        owner: &str,
        id: u64,
        visit_id: u64,
        new_day: u32,
    ) -> Result<Itinerary> {
        self.store.update(owner, id, &mut |it| {
            editing::move_visit_to_day(it, visit_id, new_day)
        })
    }

    /// Structural edits change which POIs are visited, so the stored
    /// checklist is refreshed along with the edit, inside the same
    /// critical section.
    fn update_with_equipment(
        &self,
        owner: &str,
        id: u64,
        profile: Option<&TravelerProfile>,
        mutate: &mut dyn FnMut(&mut Itinerary) -> Result<()>,
    ) -> Result<Itinerary> {
        self.store.update(owner, id, &mut |it| {
            mutate(it)?;
            refresh_equipment(it, profile);
            Ok(())
        })
    }
}

fn refresh_equipment(itinerary: &mut Itinerary, profile: Option<&TravelerProfile>) {
    let items = equipment::build_equipment(itinerary.visits(), profile);
    itinerary.equipment = equipment::render_checklist(&items);
}
