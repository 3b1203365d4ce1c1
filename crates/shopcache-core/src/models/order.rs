use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer's order. Orders are fetched fresh for each request and never
/// enter a cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    #[serde(rename = "customerId")]
    pub customer_id: i32,
    pub total: Option<f64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "productId")]
    pub product_id: i32,
    pub quantity: i32,
}
