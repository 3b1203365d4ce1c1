//! The cache coordinator: the single access point between UI consumers and
//! the per-entity caches.
//!
//! Each collection accessor serves from cache when it can and otherwise
//! awaits the matching fetch operation, populates the cache, and hands the
//! fetched collection back. Single-entity accessors resolve to zero or one
//! record through the same path; absence is a successful empty result.
//! Cross-entity queries chain their cache-population prerequisites in
//! order, fetching only the stages that are still empty.

use std::collections::HashSet;

use anyhow::Result;
use tracing::{error, warn};

use crate::api::DataService;
use crate::cache::{DepartmentCache, EntityCache, InventoryCache, NO_COLOR};
use crate::models::{
    Customer, Department, Inventory, Notification, Order, Product, Promotion, Store,
};
use crate::utils::cmp_ignore_case;

/// Coordinates fetch-at-most-once caching for every entity collection.
///
/// One instance lives for the process; consumers share it behind an `Arc`.
/// All caches start empty and fill lazily on first real demand. The
/// emptiness check that gates a fetch and the population step are separate
/// critical sections: two callers racing on first access may both fetch, and
/// the first result to land wins (the other population is a no-op). Redundant
/// fetches are harmless here; cached data is never replaced.
pub struct DataProvider<S> {
    service: S,
    customers: EntityCache<Customer>,
    departments: DepartmentCache,
    products: EntityCache<Product>,
    promotions: EntityCache<Promotion>,
    stores: EntityCache<Store>,
    inventories: InventoryCache,
}

impl<S: DataService> DataProvider<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            customers: EntityCache::new("customers"),
            departments: DepartmentCache::new(),
            products: EntityCache::new("products"),
            promotions: EntityCache::new("promotions"),
            stores: EntityCache::new("stores"),
            inventories: InventoryCache::new(),
        }
    }

    // ===== Customers =====

    /// Full customer collection, fetched on first demand.
    pub async fn get_customers(&self) -> Result<Vec<Customer>> {
        if self.customers.is_empty() {
            let results = self.service.fetch_customers().await?;
            self.customers.populate(&results);
            Ok(results)
        } else {
            Ok(self.customers.all())
        }
    }

    /// Zero or one customer by id.
    pub async fn find_customer(&self, customer_id: i32) -> Result<Vec<Customer>> {
        if self.customers.is_empty() {
            self.get_customers().await?;
        }
        Ok(self.customers.get(customer_id).into_iter().collect())
    }

    // ===== Departments =====

    /// Department collection sorted by name, on the fetch path and the
    /// cache-hit path alike.
    pub async fn get_departments(&self) -> Result<Vec<Department>> {
        if self.departments.is_empty() {
            let mut results = self.service.fetch_departments().await?;
            results.sort_by(Department::name_order);
            self.departments.populate(&results);
            Ok(results)
        } else {
            let mut results = self.departments.all();
            results.sort_by(Department::name_order);
            Ok(results)
        }
    }

    /// Zero or one department by id.
    pub async fn find_department(&self, dept_id: i64) -> Result<Vec<Department>> {
        if self.departments.is_empty() {
            self.get_departments().await?;
        }
        Ok(self.departments.get(dept_id).into_iter().collect())
    }

    /// Display color for a department. Unknown departments (or a not yet
    /// populated cache) degrade to [`NO_COLOR`] so UI callers never fail
    /// over styling.
    pub fn department_color(&self, dept_id: i64) -> i32 {
        match self.departments.color(dept_id) {
            Some(color) => color,
            None => {
                error!(dept_id, "no color found for department");
                NO_COLOR
            }
        }
    }

    /// Name of the department owning `product_id`, resolved through the
    /// product cache. Assumes products and departments are already loaded;
    /// triggers no fetch and returns `None` when either hop misses.
    pub fn department_name(&self, product_id: i32) -> Option<String> {
        let product = self.products.get(product_id)?;
        let department = self.departments.get(product.department_id)?;
        Some(department.name)
    }

    // ===== Products =====

    /// Full product collection, fetched on first demand.
    pub async fn get_products(&self) -> Result<Vec<Product>> {
        if self.products.is_empty() {
            let results = self.service.fetch_products().await?;
            self.products.populate(&results);
            Ok(results)
        } else {
            Ok(self.products.all())
        }
    }

    /// Zero or one product by id.
    pub async fn find_product(&self, product_id: i32) -> Result<Vec<Product>> {
        if self.products.is_empty() {
            self.get_products().await?;
        }
        Ok(self.products.get(product_id).into_iter().collect())
    }

    // ===== Promotions =====

    /// Full promotion collection, sorted by (derived department, name) on
    /// both paths.
    pub async fn get_promotions(&self) -> Result<Vec<Promotion>> {
        if self.promotions.is_empty() {
            let results = self.service.fetch_promotions().await?;
            self.promotions.populate(&results);
            Ok(self.sort_promotions(results))
        } else {
            Ok(self.sort_promotions(self.promotions.all()))
        }
    }

    /// Zero or one promotion by id.
    pub async fn find_promotion(&self, promo_id: i32) -> Result<Vec<Promotion>> {
        if self.promotions.is_empty() {
            self.get_promotions().await?;
        }
        Ok(self.promotions.get(promo_id).into_iter().collect())
    }

    /// Promotions whose derived department is one of `dept_ids`.
    ///
    /// A promotion's department is reached through its product, so this is a
    /// two-stage chain: products load first, then promotions, each stage
    /// fetching only when its cache is empty. A failure at either stage
    /// propagates to the caller unchanged. Promotions referencing a product
    /// that is not in the cache are skipped, not surfaced as an error.
    pub async fn find_promotions_by_departments(&self, dept_ids: &[i64]) -> Result<Vec<Promotion>> {
        if dept_ids.is_empty() {
            return Ok(Vec::new());
        }

        if self.products.is_empty() {
            self.get_products().await?;
        }
        if self.promotions.is_empty() {
            self.get_promotions().await?;
        }

        let requested: HashSet<i64> = dept_ids.iter().copied().collect();
        let mut matches = Vec::new();

        for promo in self.promotions.all() {
            match self.products.get(promo.product_id) {
                Some(product) => {
                    if requested.contains(&product.department_id) {
                        matches.push(promo);
                    }
                }
                None => {
                    warn!(
                        promotion_id = promo.id,
                        product_id = promo.product_id,
                        "promotion references a product that was not found; skipping"
                    );
                }
            }
        }

        Ok(self.sort_promotions(matches))
    }

    /// (derived department, name) order. Promotions whose product cannot be
    /// resolved sort after every resolvable one.
    fn sort_promotions(&self, mut promotions: Vec<Promotion>) -> Vec<Promotion> {
        promotions.sort_by(|a, b| {
            self.promotion_department(a)
                .cmp(&self.promotion_department(b))
                .then_with(|| cmp_ignore_case(&a.name, &b.name))
        });
        promotions
    }

    fn promotion_department(&self, promo: &Promotion) -> i64 {
        self.products
            .get(promo.product_id)
            .map(|product| product.department_id)
            .unwrap_or(i64::MAX)
    }

    // ===== Stores =====

    /// Full store collection, fetched on first demand.
    pub async fn get_stores(&self) -> Result<Vec<Store>> {
        if self.stores.is_empty() {
            let results = self.service.fetch_stores().await?;
            self.stores.populate(&results);
            Ok(results)
        } else {
            Ok(self.stores.all())
        }
    }

    /// Zero or one store by id.
    pub async fn find_store(&self, store_id: i32) -> Result<Vec<Store>> {
        if self.stores.is_empty() {
            self.get_stores().await?;
        }
        Ok(self.stores.get(store_id).into_iter().collect())
    }

    // ===== Inventory =====

    /// Inventory snapshot grouped by product, each group in store order.
    /// Keyword filtering is the fetch operation's job; the cache holds
    /// whatever the first fetch returned.
    pub async fn get_inventories(&self, keywords: &[String]) -> Result<Vec<Inventory>> {
        if self.inventories.is_empty() {
            let results = self.service.fetch_inventories(keywords).await?;
            self.inventories.populate(&results);
        }
        Ok(self.inventories.product_view())
    }

    /// Inventory held by one store, in product order. Assumes inventory is
    /// already loaded.
    pub fn store_inventory(&self, store_id: i32) -> Vec<Inventory> {
        self.inventories.for_store(store_id)
    }

    /// Stores carrying one product, in store order. Assumes inventory is
    /// already loaded.
    pub fn product_inventory(&self, product_id: i32) -> Vec<Inventory> {
        self.inventories.for_product(product_id)
    }

    // ===== Orders & notifications (never cached) =====

    /// Orders for one customer, fetched fresh on every call.
    pub async fn get_orders(&self, customer_id: i32) -> Result<Vec<Order>> {
        self.service.fetch_orders(customer_id).await
    }

    /// Notifications for one customer, fetched fresh on every call.
    pub async fn get_notifications(&self, customer_id: i32) -> Result<Vec<Notification>> {
        self.service.fetch_notifications(customer_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::cache::DEPARTMENT_COLORS;

    #[derive(Default)]
    struct Calls {
        customers: AtomicUsize,
        departments: AtomicUsize,
        products: AtomicUsize,
        promotions: AtomicUsize,
        stores: AtomicUsize,
        inventories: AtomicUsize,
        orders: AtomicUsize,
        notifications: AtomicUsize,
    }

    #[derive(Default)]
    struct MockService {
        customers: Vec<Customer>,
        departments: Vec<Department>,
        products: Vec<Product>,
        promotions: Vec<Promotion>,
        stores: Vec<Store>,
        inventories: Vec<Inventory>,
        orders: Vec<Order>,
        notifications: Vec<Notification>,
        fail_products: Arc<AtomicBool>,
        fail_promotions: Arc<AtomicBool>,
        calls: Arc<Calls>,
        last_keywords: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl DataService for MockService {
        async fn fetch_customers(&self) -> Result<Vec<Customer>> {
            self.calls.customers.fetch_add(1, Ordering::SeqCst);
            Ok(self.customers.clone())
        }

        async fn fetch_departments(&self) -> Result<Vec<Department>> {
            self.calls.departments.fetch_add(1, Ordering::SeqCst);
            Ok(self.departments.clone())
        }

        async fn fetch_products(&self) -> Result<Vec<Product>> {
            self.calls.products.fetch_add(1, Ordering::SeqCst);
            if self.fail_products.load(Ordering::SeqCst) {
                return Err(anyhow!("products fetch failed"));
            }
            Ok(self.products.clone())
        }

        async fn fetch_promotions(&self) -> Result<Vec<Promotion>> {
            self.calls.promotions.fetch_add(1, Ordering::SeqCst);
            if self.fail_promotions.load(Ordering::SeqCst) {
                return Err(anyhow!("promotions fetch failed"));
            }
            Ok(self.promotions.clone())
        }

        async fn fetch_stores(&self) -> Result<Vec<Store>> {
            self.calls.stores.fetch_add(1, Ordering::SeqCst);
            Ok(self.stores.clone())
        }

        async fn fetch_inventories(&self, keywords: &[String]) -> Result<Vec<Inventory>> {
            self.calls.inventories.fetch_add(1, Ordering::SeqCst);
            *self.last_keywords.lock().unwrap() = keywords.to_vec();
            Ok(self.inventories.clone())
        }

        async fn fetch_orders(&self, _customer_id: i32) -> Result<Vec<Order>> {
            self.calls.orders.fetch_add(1, Ordering::SeqCst);
            Ok(self.orders.clone())
        }

        async fn fetch_notifications(&self, _customer_id: i32) -> Result<Vec<Notification>> {
            self.calls.notifications.fetch_add(1, Ordering::SeqCst);
            Ok(self.notifications.clone())
        }
    }

    fn customer(id: i32, name: &str) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            email: None,
            addr1: None,
            addr2: None,
            city: None,
            state: None,
            zip: None,
            phone: None,
        }
    }

    fn department(id: i64, name: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    fn product(id: i32, department_id: i64, name: &str) -> Product {
        Product {
            id,
            department_id,
            name: name.to_string(),
            description: None,
            msrp: None,
        }
    }

    fn promotion(id: i32, product_id: i32, name: &str) -> Promotion {
        Promotion {
            id,
            product_id,
            name: name.to_string(),
            discount: None,
        }
    }

    fn inventory(store_id: i32, product_id: i32, quantity: i32) -> Inventory {
        Inventory {
            store_id,
            product_id,
            quantity,
        }
    }

    /// Surface provider logs in test output when RUST_LOG is set.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    const DEPT_A: i64 = 100;
    const DEPT_B: i64 = 200;

    /// Catalog shared by the promotion chain tests: products 1 and 3 belong
    /// to department A, product 2 to department B, with one promotion per
    /// product plus a second one on product 1.
    fn catalog_service() -> MockService {
        MockService {
            products: vec![
                product(1, DEPT_A, "Trail Jacket"),
                product(2, DEPT_B, "Camp Stove"),
                product(3, DEPT_A, "Day Pack"),
            ],
            promotions: vec![
                promotion(11, 1, "Jacket Week"),
                promotion(12, 2, "Stove Sale"),
                promotion(13, 1, "Autumn Clearance"),
            ],
            ..MockService::default()
        }
    }

    #[tokio::test]
    async fn test_collection_fetched_once_then_served_from_cache() {
        let service = MockService {
            products: vec![product(1, DEPT_A, "Trail Jacket")],
            ..MockService::default()
        };
        let calls = service.calls.clone();
        let provider = DataProvider::new(service);

        for _ in 0..3 {
            let products = provider.get_products().await.unwrap();
            assert_eq!(products.len(), 1);
        }

        assert_eq!(calls.products.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_unknown_product_succeeds_empty() {
        let service = MockService {
            products: vec![product(1, DEPT_A, "Trail Jacket")],
            ..MockService::default()
        };
        let provider = DataProvider::new(service);

        let found = provider.find_product(999).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_find_loads_collection_on_first_use() {
        let service = MockService {
            customers: vec![customer(7, "Sasha"), customer(8, "Drew")],
            ..MockService::default()
        };
        let calls = service.calls.clone();
        let provider = DataProvider::new(service);

        let found = provider.find_customer(8).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Drew");
        assert_eq!(calls.customers.load(Ordering::SeqCst), 1);

        // Second lookup resolves from cache.
        let found = provider.find_customer(7).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(calls.customers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_departments_sorted_by_name_on_both_paths() {
        let service = MockService {
            departments: vec![department(20, "Zebra"), department(10, "Alpha")],
            ..MockService::default()
        };
        let provider = DataProvider::new(service);

        let fetched = provider.get_departments().await.unwrap();
        let names: Vec<&str> = fetched.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zebra"]);

        let cached = provider.get_departments().await.unwrap();
        let names: Vec<&str> = cached.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zebra"]);
    }

    #[tokio::test]
    async fn test_department_colors_zip_against_name_sorted_order() {
        let service = MockService {
            departments: vec![department(20, "Zebra"), department(10, "Alpha")],
            ..MockService::default()
        };
        let provider = DataProvider::new(service);
        provider.get_departments().await.unwrap();

        assert_eq!(provider.department_color(10), DEPARTMENT_COLORS[0]);
        assert_eq!(provider.department_color(20), DEPARTMENT_COLORS[1]);
    }

    #[tokio::test]
    async fn test_department_color_degrades_to_sentinel() {
        let service = MockService::default();
        let provider = DataProvider::new(service);

        // Nothing loaded at all: still just the sentinel, no panic.
        assert_eq!(provider.department_color(42), NO_COLOR);
    }

    #[tokio::test]
    async fn test_department_name_resolves_two_hops() {
        let service = MockService {
            departments: vec![department(DEPT_A, "Apparel")],
            products: vec![product(1, DEPT_A, "Trail Jacket"), product(2, 999, "Orphan")],
            ..MockService::default()
        };
        let provider = DataProvider::new(service);
        provider.get_departments().await.unwrap();
        provider.get_products().await.unwrap();

        assert_eq!(provider.department_name(1).as_deref(), Some("Apparel"));
        // Second hop misses: product 2 references an unknown department.
        assert_eq!(provider.department_name(2), None);
        // First hop misses: unknown product.
        assert_eq!(provider.department_name(777), None);
    }

    #[tokio::test]
    async fn test_promotions_by_departments_empty_ids_fetches_nothing() {
        let service = catalog_service();
        let calls = service.calls.clone();
        let provider = DataProvider::new(service);

        let promos = provider.find_promotions_by_departments(&[]).await.unwrap();
        assert!(promos.is_empty());
        assert_eq!(calls.products.load(Ordering::SeqCst), 0);
        assert_eq!(calls.promotions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_promotions_by_departments_filters_through_products() {
        let service = catalog_service();
        let provider = DataProvider::new(service);

        let promos = provider
            .find_promotions_by_departments(&[DEPT_A])
            .await
            .unwrap();

        let ids: Vec<i32> = promos.iter().map(|p| p.id).collect();
        // Pr1 and Pr3 resolve to department A; within one department the
        // order is by name.
        assert_eq!(ids, vec![13, 11]);
    }

    #[tokio::test]
    async fn test_promotions_by_departments_skips_dangling_products() {
        init_tracing();
        let mut service = catalog_service();
        service.promotions.push(promotion(19, 999, "Ghost Sale"));
        let provider = DataProvider::new(service);

        let promos = provider
            .find_promotions_by_departments(&[DEPT_A, DEPT_B])
            .await
            .unwrap();

        let ids: Vec<i32> = promos.iter().map(|p| p.id).collect();
        assert!(!ids.contains(&19));
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_promotion_chain_short_circuits_loaded_stages() {
        let service = catalog_service();
        let calls = service.calls.clone();
        let provider = DataProvider::new(service);

        // Products already cached; the chain must fetch promotions only.
        provider.get_products().await.unwrap();
        assert_eq!(calls.products.load(Ordering::SeqCst), 1);

        provider
            .find_promotions_by_departments(&[DEPT_A])
            .await
            .unwrap();

        assert_eq!(calls.products.load(Ordering::SeqCst), 1);
        assert_eq!(calls.promotions.load(Ordering::SeqCst), 1);

        // Everything cached; a second chained query fetches nothing.
        provider
            .find_promotions_by_departments(&[DEPT_B])
            .await
            .unwrap();
        assert_eq!(calls.products.load(Ordering::SeqCst), 1);
        assert_eq!(calls.promotions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_promotion_chain_propagates_first_stage_failure() {
        let service = catalog_service();
        let calls = service.calls.clone();
        service.fail_products.store(true, Ordering::SeqCst);
        let provider = DataProvider::new(service);

        let result = provider.find_promotions_by_departments(&[DEPT_A]).await;
        assert!(result.is_err());
        // Stage 2 never starts when stage 1 fails.
        assert_eq!(calls.promotions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_promotion_chain_propagates_second_stage_failure() {
        let service = catalog_service();
        let fail_promotions = service.fail_promotions.clone();
        fail_promotions.store(true, Ordering::SeqCst);
        let provider = DataProvider::new(service);

        let result = provider.find_promotions_by_departments(&[DEPT_A]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let service = catalog_service();
        let calls = service.calls.clone();
        let fail_products = service.fail_products.clone();
        let provider = DataProvider::new(service);

        fail_products.store(true, Ordering::SeqCst);
        assert!(provider.get_products().await.is_err());

        // The failure left the cache empty; the next call retries the fetch.
        fail_products.store(false, Ordering::SeqCst);
        let products = provider.get_products().await.unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(calls.products.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_promotions_sorted_by_department_then_name() {
        let service = catalog_service();
        let provider = DataProvider::new(service);

        provider.get_products().await.unwrap();
        let promos = provider.get_promotions().await.unwrap();

        let ids: Vec<i32> = promos.iter().map(|p| p.id).collect();
        // Department A ("Autumn Clearance", "Jacket Week"), then department B.
        assert_eq!(ids, vec![13, 11, 12]);
    }

    #[tokio::test]
    async fn test_orders_and_notifications_bypass_the_cache() {
        let service = MockService::default();
        let calls = service.calls.clone();
        let provider = DataProvider::new(service);

        provider.get_orders(7).await.unwrap();
        provider.get_orders(7).await.unwrap();
        assert_eq!(calls.orders.load(Ordering::SeqCst), 2);

        provider.get_notifications(7).await.unwrap();
        provider.get_notifications(7).await.unwrap();
        assert_eq!(calls.notifications.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_inventory_keywords_delegate_to_the_fetch() {
        let service = MockService {
            inventories: vec![inventory(1, 10, 5)],
            ..MockService::default()
        };
        let calls = service.calls.clone();
        let last_keywords = service.last_keywords.clone();
        let provider = DataProvider::new(service);

        let keywords = vec!["jacket".to_string()];
        provider.get_inventories(&keywords).await.unwrap();
        assert_eq!(*last_keywords.lock().unwrap(), keywords);

        // Cache hit: the second call never reaches the service.
        provider.get_inventories(&[]).await.unwrap();
        assert_eq!(calls.inventories.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_inventory_views_through_the_provider() {
        let service = MockService {
            inventories: vec![inventory(1, 20, 3), inventory(2, 10, 7), inventory(1, 10, 5)],
            ..MockService::default()
        };
        let provider = DataProvider::new(service);

        let snapshot = provider.get_inventories(&[]).await.unwrap();
        assert_eq!(snapshot.len(), 3);

        let store1: Vec<i32> = provider
            .store_inventory(1)
            .iter()
            .map(|i| i.product_id)
            .collect();
        assert_eq!(store1, vec![10, 20]);

        let product10: Vec<i32> = provider
            .product_inventory(10)
            .iter()
            .map(|i| i.store_id)
            .collect();
        assert_eq!(product10, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_concurrent_first_access_populates_once() {
        let service = MockService {
            stores: vec![Store {
                id: 1,
                name: Some("Downtown".to_string()),
                addr1: None,
                addr2: None,
                city: None,
                state: None,
                zip: None,
                phone: None,
            }],
            ..MockService::default()
        };
        let provider = Arc::new(DataProvider::new(service));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let provider = provider.clone();
            handles.push(tokio::spawn(
                async move { provider.get_stores().await },
            ));
        }
        for handle in handles {
            let stores = handle.await.unwrap().unwrap();
            assert_eq!(stores.len(), 1);
        }

        // Racing callers may each have fetched; the cache still holds exactly
        // one result set.
        let stores = provider.get_stores().await.unwrap();
        assert_eq!(stores.len(), 1);
    }
}
