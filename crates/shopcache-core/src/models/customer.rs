use serde::{Deserialize, Serialize};

use super::Identified;

/// A registered shopper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub addr1: Option<String>,
    pub addr2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

impl Customer {
    /// Key value meaning no customer is logged in.
    pub const UNKNOWN_ID: i32 = -1;
}

impl Identified for Customer {
    type Id = i32;

    fn id(&self) -> i32 {
        self.id
    }
}
