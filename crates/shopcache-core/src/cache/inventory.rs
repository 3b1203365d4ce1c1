use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard};

use tracing::debug;

use crate::models::Inventory;

#[derive(Default)]
struct Indexes {
    /// store id -> entries for that store, in product order.
    by_store: BTreeMap<i32, Vec<Inventory>>,
    /// product id -> entries for that product, in store order.
    by_product: BTreeMap<i32, Vec<Inventory>>,
}

/// Inventory cache with two derived grouping indexes.
///
/// Both indexes are built wholesale from the same fetch result and hold the
/// same set of entries; they differ only in grouping and order. Entries that
/// repeat a (store, product) pair collapse to one per index.
pub struct InventoryCache {
    indexes: RwLock<Indexes>,
}

impl InventoryCache {
    pub fn new() -> Self {
        Self {
            indexes: RwLock::new(Indexes::default()),
        }
    }

    /// True until the cache has been populated with at least one record.
    pub fn is_empty(&self) -> bool {
        self.read().by_store.is_empty()
    }

    /// Build both indexes from one fetch result. No-op when already populated.
    pub fn populate(&self, items: &[Inventory]) {
        let mut indexes = self.indexes.write().expect("cache lock poisoned");
        if !indexes.by_store.is_empty() {
            return;
        }

        debug!(records = items.len(), "populating inventory cache");

        for item in items {
            indexes
                .by_store
                .entry(item.store_id)
                .or_default()
                .push(item.clone());
            indexes
                .by_product
                .entry(item.product_id)
                .or_default()
                .push(item.clone());
        }

        for bucket in indexes.by_store.values_mut() {
            bucket.sort_unstable_by(Inventory::product_order);
            bucket.dedup_by_key(|entry| entry.product_id);
        }
        for bucket in indexes.by_product.values_mut() {
            bucket.sort_unstable_by(Inventory::store_order);
            bucket.dedup_by_key(|entry| entry.store_id);
        }
    }

    /// Entries held by one store, in product order.
    pub fn for_store(&self, store_id: i32) -> Vec<Inventory> {
        self.read().by_store.get(&store_id).cloned().unwrap_or_default()
    }

    /// Entries for one product across stores, in store order.
    pub fn for_product(&self, product_id: i32) -> Vec<Inventory> {
        self.read()
            .by_product
            .get(&product_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Full snapshot grouped by store, each group in product order.
    pub fn store_view(&self) -> Vec<Inventory> {
        self.read().by_store.values().flatten().cloned().collect()
    }

    /// Full snapshot grouped by product, each group in store order.
    pub fn product_view(&self) -> Vec<Inventory> {
        self.read().by_product.values().flatten().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Indexes> {
        self.indexes.read().expect("cache lock poisoned")
    }
}

impl Default for InventoryCache {
    fn default() -> Self {
        Self::new()
    }
}
