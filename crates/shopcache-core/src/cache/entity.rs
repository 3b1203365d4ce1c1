use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use tracing::debug;

use crate::models::Identified;

/// A populate-once cache of entities keyed by identity.
///
/// The first population wins: once the map is non-empty, later `populate`
/// calls are no-ops. Callers that race on first access may each trigger a
/// fetch, but only one result set is ever written.
pub struct EntityCache<T: Identified> {
    name: &'static str,
    entries: RwLock<HashMap<T::Id, T>>,
}

impl<T> EntityCache<T>
where
    T: Identified + Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// True until the cache has been populated with at least one record.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Insert all items keyed by identity. No-op when already populated.
    pub fn populate(&self, items: &[T]) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        if !entries.is_empty() {
            return;
        }

        debug!(cache = self.name, records = items.len(), "populating cache");

        for item in items {
            entries.insert(item.id(), item.clone());
        }
    }

    pub fn get(&self, id: T::Id) -> Option<T> {
        self.read().get(&id).cloned()
    }

    /// Snapshot of every cached entity, in no particular order.
    pub fn all(&self) -> Vec<T> {
        self.read().values().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<T::Id, T>> {
        self.entries.read().expect("cache lock poisoned")
    }
}
