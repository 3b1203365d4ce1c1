use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    Customer, Department, Inventory, Notification, Order, Product, Promotion, Store,
};

/// The remote fetch operation contract, one method per entity type.
///
/// Each call asynchronously retrieves the full current collection for its
/// type or fails; exactly one `Ok` or `Err` per invocation. Failures carry
/// either a structured [`super::ApiError`] or a plain message. The
/// coordinator never retries and never inspects the transport.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn fetch_customers(&self) -> Result<Vec<Customer>>;

    async fn fetch_departments(&self) -> Result<Vec<Department>>;

    async fn fetch_products(&self) -> Result<Vec<Product>>;

    async fn fetch_promotions(&self) -> Result<Vec<Promotion>>;

    async fn fetch_stores(&self) -> Result<Vec<Store>>;

    /// Inventory, optionally narrowed by free-text keywords. Filtering is the
    /// service's job, not the cache's.
    async fn fetch_inventories(&self, keywords: &[String]) -> Result<Vec<Inventory>>;

    /// Orders for one customer.
    async fn fetch_orders(&self, customer_id: i32) -> Result<Vec<Order>>;

    /// Notifications for one customer.
    async fn fetch_notifications(&self, customer_id: i32) -> Result<Vec<Notification>>;
}
