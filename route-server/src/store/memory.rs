//! Thread-safe in-memory store.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{Leg, LegId, Location, LocationId, NewLeg, NewLocation};
use crate::planner::{LocationLookup, Page, PageRequest, SearchError, TransportationSource};

use super::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    locations: BTreeMap<LocationId, Location>,
    legs: BTreeMap<LegId, Leg>,
    last_location_id: u64,
    last_leg_id: u64,
    /// Bumped on every change to the leg set.
    revision: u64,
}

impl Inner {
    fn name_taken(&self, name: &str, except: Option<LocationId>) -> bool {
        self.locations
            .values()
            .any(|l| l.name == name && Some(l.id) != except)
    }

    fn check_endpoints(&self, leg: &NewLeg) -> Result<(), StoreError> {
        for id in [leg.origin, leg.destination] {
            if !self.locations.contains_key(&id) {
                return Err(StoreError::UnknownLocation(id));
            }
        }
        Ok(())
    }
}

/// Locations and transportations held in memory.
///
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Inner>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location and return it with its new id.
    pub async fn create_location(&self, location: NewLocation) -> Result<Location, StoreError> {
        location.validate()?;

        let mut guard = self.inner.write().await;
        if guard.name_taken(&location.name, None) {
            return Err(StoreError::DuplicateName(location.name));
        }

        guard.last_location_id += 1;
        let stored = location.with_id(LocationId(guard.last_location_id));
        guard.locations.insert(stored.id, stored.clone());

        debug!(id = %stored.id, name = %stored.name, "created location");
        Ok(stored)
    }

    /// Look up a location by id.
    pub async fn get_location(&self, id: LocationId) -> Result<Location, StoreError> {
        let guard = self.inner.read().await;
        guard
            .locations
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: "Location",
                id: id.0,
            })
    }

    /// Replace a location's name and coordinates.
    pub async fn update_location(
        &self,
        id: LocationId,
        location: NewLocation,
    ) -> Result<Location, StoreError> {
        location.validate()?;

        let mut guard = self.inner.write().await;
        if !guard.locations.contains_key(&id) {
            return Err(StoreError::NotFound {
                kind: "Location",
                id: id.0,
            });
        }
        if guard.name_taken(&location.name, Some(id)) {
            return Err(StoreError::DuplicateName(location.name));
        }

        let stored = location.with_id(id);
        guard.locations.insert(id, stored.clone());
        Ok(stored)
    }

    /// Remove a location that no transportation uses.
    pub async fn delete_location(&self, id: LocationId) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        if !guard.locations.contains_key(&id) {
            return Err(StoreError::NotFound {
                kind: "Location",
                id: id.0,
            });
        }

        let legs = guard
            .legs
            .values()
            .filter(|leg| leg.origin == id || leg.destination == id)
            .count();
        if legs > 0 {
            return Err(StoreError::LocationInUse { id, legs });
        }

        guard.locations.remove(&id);
        Ok(())
    }

    /// List locations in id order.
    pub async fn list_locations(&self, request: &PageRequest) -> Page<Location> {
        let guard = self.inner.read().await;
        Page::from_full(guard.locations.values().cloned().collect(), request)
    }

    /// Find locations whose name contains `query`, ignoring case.
    pub async fn search_locations(&self, query: &str, request: &PageRequest) -> Page<Location> {
        let needle = query.trim().to_lowercase();
        let guard = self.inner.read().await;
        let matches = guard
            .locations
            .values()
            .filter(|l| l.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Page::from_full(matches, request)
    }

    /// Fetch several locations at once, skipping unknown ids.
    pub async fn locations_by_id(
        &self,
        ids: impl IntoIterator<Item = LocationId>,
    ) -> HashMap<LocationId, Location> {
        let guard = self.inner.read().await;
        ids.into_iter()
            .filter_map(|id| guard.locations.get(&id).map(|l| (id, l.clone())))
            .collect()
    }

    /// Add a transportation between two existing locations.
    pub async fn create_leg(&self, leg: NewLeg) -> Result<Leg, StoreError> {
        leg.validate()?;

        let mut guard = self.inner.write().await;
        guard.check_endpoints(&leg)?;

        guard.last_leg_id += 1;
        let stored = leg.with_id(LegId(guard.last_leg_id));
        guard.legs.insert(stored.id, stored.clone());
        guard.revision += 1;

        debug!(id = %stored.id, name = %stored.name, kind = %stored.kind, "created transportation");
        Ok(stored)
    }

    /// Look up a transportation by id.
    pub async fn get_leg(&self, id: LegId) -> Result<Leg, StoreError> {
        let guard = self.inner.read().await;
        guard.legs.get(&id).cloned().ok_or(StoreError::NotFound {
            kind: "Transportation",
            id: id.0,
        })
    }

    /// Replace every field of a transportation.
    pub async fn update_leg(&self, id: LegId, leg: NewLeg) -> Result<Leg, StoreError> {
        leg.validate()?;

        let mut guard = self.inner.write().await;
        if !guard.legs.contains_key(&id) {
            return Err(StoreError::NotFound {
                kind: "Transportation",
                id: id.0,
            });
        }
        guard.check_endpoints(&leg)?;

        let stored = leg.with_id(id);
        guard.legs.insert(id, stored.clone());
        guard.revision += 1;
        Ok(stored)
    }

    /// Remove a transportation.
    pub async fn delete_leg(&self, id: LegId) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        if guard.legs.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                kind: "Transportation",
                id: id.0,
            });
        }
        guard.revision += 1;
        Ok(())
    }

    /// List transportations in id order.
    pub async fn list_legs(&self, request: &PageRequest) -> Page<Leg> {
        let guard = self.inner.read().await;
        Page::from_full(guard.legs.values().cloned().collect(), request)
    }

    /// Current revision of the leg set.
    pub async fn revision(&self) -> u64 {
        self.inner.read().await.revision
    }

    /// All transportations in id order, with the revision they were read at.
    pub async fn snapshot(&self) -> (u64, Arc<Vec<Leg>>) {
        let guard = self.inner.read().await;
        let legs = guard.legs.values().cloned().collect();
        (guard.revision, Arc::new(legs))
    }

    pub async fn location_count(&self) -> usize {
        self.inner.read().await.locations.len()
    }

    pub async fn leg_count(&self) -> usize {
        self.inner.read().await.legs.len()
    }
}

impl LocationLookup for Store {
    async fn get(&self, id: LocationId) -> Result<Location, SearchError> {
        self.get_location(id)
            .await
            .map_err(|_| SearchError::LocationNotFound(id))
    }
}

impl TransportationSource for Store {
    async fn list_all(&self) -> Result<Arc<Vec<Leg>>, SearchError> {
        let (_, legs) = self.snapshot().await;
        Ok(legs)
    }
}
