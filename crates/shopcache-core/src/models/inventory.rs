use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Stock of one product at one store. Identity is the composite
/// (store, product) pair; there is no independent key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(rename = "storeId")]
    pub store_id: i32,
    #[serde(rename = "productId")]
    pub product_id: i32,
    pub quantity: i32,
}

impl Inventory {
    /// Ordering for entries grouped under one store.
    pub fn product_order(a: &Inventory, b: &Inventory) -> Ordering {
        a.product_id
            .cmp(&b.product_id)
            .then(a.store_id.cmp(&b.store_id))
    }

    /// Ordering for entries grouped under one product.
    pub fn store_order(a: &Inventory, b: &Inventory) -> Ordering {
        a.store_id
            .cmp(&b.store_id)
            .then(a.product_id.cmp(&b.product_id))
    }
}
