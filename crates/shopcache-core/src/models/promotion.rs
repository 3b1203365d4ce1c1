use serde::{Deserialize, Serialize};

use super::Identified;

/// A discount on one product. The owning department is not stored; it is
/// derived by dereferencing `product_id` into the product cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i32,
    #[serde(rename = "productId")]
    pub product_id: i32,
    pub name: String,
    /// Percent off MSRP.
    pub discount: Option<f64>,
}

impl Identified for Promotion {
    type Id = i32;

    fn id(&self) -> i32 {
        self.id
    }
}
