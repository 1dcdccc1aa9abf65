//! In-memory itinerary repository
//!
//! Each mutating operation against one itinerary runs under that
//! itinerary's own lock, on a working clone that is committed only when the
//! operation succeeds. Concurrent readers therefore never observe a
//! partially renumbered day, and a failing multi-step edit leaves the
//! previously committed state unchanged. Reads clone a snapshot and hold no
//! long-lived lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use crate::error::PlannerError;
use crate::models::Itinerary;
use crate::Result;

/// Repository port for itineraries
pub trait ItineraryStore: Send + Sync {
    /// Persist a new itinerary and return its id
    fn insert(&self, itinerary: Itinerary) -> Result<u64>;

    /// Snapshot of an itinerary owned by `owner`
    fn get(&self, owner: &str, id: u64) -> Result<Itinerary>;

    /// Snapshots of all itineraries owned by `owner`, newest first
    fn list(&self, owner: &str) -> Result<Vec<Itinerary>>;

    /// Run a mutation under the itinerary's exclusive critical section.
    ///
    /// The mutation sees a working copy; it is committed only when the
    /// closure returns Ok.
    fn update(
        &self,
        owner: &str,
        id: u64,
        mutate: &mut dyn FnMut(&mut Itinerary) -> Result<()>,
    ) -> Result<Itinerary>;

    /// Delete an itinerary owned by `owner`
    fn delete(&self, owner: &str, id: u64) -> Result<()>;
}

/// Thread-safe in-memory implementation of the repository port
#[derive(Default)]
pub struct InMemoryItineraryStore {
    entries: RwLock<HashMap<u64, Arc<Mutex<Itinerary>>>>,
    next_id: AtomicU64,
}

impl InMemoryItineraryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn entry(&self, id: u64) -> Result<Arc<Mutex<Itinerary>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PlannerError::conflict("itinerary table lock poisoned"))?;
        entries
            .get(&id)
            .cloned()
            .ok_or_else(|| PlannerError::not_found(format!("itinerary {id}")))
    }
}

impl ItineraryStore for InMemoryItineraryStore {
    fn insert(&self, mut itinerary: Itinerary) -> Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        itinerary.id = id;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PlannerError::conflict("itinerary table lock poisoned"))?;
        entries.insert(id, Arc::new(Mutex::new(itinerary)));
        debug!(id, "stored itinerary");
        Ok(id)
    }

    fn get(&self, owner: &str, id: u64) -> Result<Itinerary> {
        let entry = self.entry(id)?;
        let guard = entry
            .lock()
            .map_err(|_| PlannerError::conflict(format!("itinerary {id} lock poisoned")))?;
        if guard.owner != owner {
            return Err(PlannerError::not_found(format!("itinerary {id}")));
        }
        Ok(guard.clone())
    }

    fn list(&self, owner: &str) -> Result<Vec<Itinerary>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PlannerError::conflict("itinerary table lock poisoned"))?;
        let mut items = Vec::new();
        for entry in entries.values() {
            let guard = entry
                .lock()
                .map_err(|_| PlannerError::conflict("itinerary lock poisoned"))?;
            if guard.owner == owner {
                items.push(guard.clone());
            }
        }
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    fn update(
        &self,
        owner: &str,
        id: u64,
        mutate: &mut dyn FnMut(&mut Itinerary) -> Result<()>,
    ) -> Result<Itinerary> {
        let entry = self.entry(id)?;
        let mut guard = entry
            .lock()
            .map_err(|_| PlannerError::conflict(format!("itinerary {id} lock poisoned")))?;
        if guard.owner != owner {
            return Err(PlannerError::not_found(format!("itinerary {id}")));
        }

        // all-or-nothing: mutate a working copy, commit on success
        let mut working = guard.clone();
        mutate(&mut working)?;
        *guard = working;
        Ok(guard.clone())
    }

    fn delete(&self, owner: &str, id: u64) -> Result<()> {
        // verify ownership before touching the table
        self.get(owner, id)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PlannerError::conflict("itinerary table lock poisoned"))?;
        entries.remove(&id);
        debug!(id, "deleted itinerary");
        Ok(())
    }
}
