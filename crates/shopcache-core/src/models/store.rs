use serde::{Deserialize, Serialize};

use super::Identified;

/// A physical store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i32,
    pub name: Option<String>,
    pub addr1: Option<String>,
    pub addr2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

impl Store {
    /// Single-line location summary for display.
    pub fn location(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(ref addr1) = self.addr1 {
            if !addr1.is_empty() {
                parts.push(addr1.clone());
            }
        }
        if let Some(ref city) = self.city {
            if !city.is_empty() {
                match &self.state {
                    Some(state) if !state.is_empty() => parts.push(format!("{}, {}", city, state)),
                    _ => parts.push(city.clone()),
                }
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl Identified for Store {
    type Id = i32;

    fn id(&self) -> i32 {
        self.id
    }
}
