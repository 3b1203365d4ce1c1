use serde::{Deserialize, Serialize};

use super::Identified;

/// A catalog product owned by one department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    #[serde(rename = "departmentId")]
    pub department_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub msrp: Option<f64>,
}

impl Identified for Product {
    type Id = i32;

    fn id(&self) -> i32 {
        self.id
    }
}
