use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Identified;
use crate::utils::cmp_ignore_case;

/// A catalog department. Display color is not part of the record; it is
/// assigned positionally when the department cache is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Department {
    /// Ordering used everywhere departments are presented.
    pub fn name_order(a: &Department, b: &Department) -> Ordering {
        cmp_ignore_case(&a.name, &b.name)
    }
}

impl Identified for Department {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}
