use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use tracing::debug;

use crate::models::Department;

/// Sentinel returned when a department has no resolvable display color.
pub const NO_COLOR: i32 = -1;

/// Display colors assigned to departments by position in the name-sorted
/// collection. The table is fixed local configuration; departments past its
/// end get no color and resolve to [`NO_COLOR`].
pub const DEPARTMENT_COLORS: [i32; 12] = [
    0xFFEF5350_u32 as i32, // red
    0xFFEC407A_u32 as i32, // pink
    0xFFAB47BC_u32 as i32, // purple
    0xFF5C6BC0_u32 as i32, // indigo
    0xFF42A5F5_u32 as i32, // blue
    0xFF26A69A_u32 as i32, // teal
    0xFF66BB6A_u32 as i32, // green
    0xFFD4E157_u32 as i32, // lime
    0xFFFFCA28_u32 as i32, // amber
    0xFFFF7043_u32 as i32, // deep orange
    0xFF8D6E63_u32 as i32, // brown
    0xFF78909C_u32 as i32, // blue grey
];

#[derive(Default)]
struct Entries {
    departments: HashMap<i64, Department>,
    colors: HashMap<i64, i32>,
}

/// Department cache plus the derived department-to-color map.
///
/// Colors are positional, not keyed: the caller passes the collection sorted
/// by name and each department is zipped against [`DEPARTMENT_COLORS`] in
/// that order. Color lookups are only meaningful after population.
pub struct DepartmentCache {
    entries: RwLock<Entries>,
}

impl DepartmentCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
        }
    }

    /// True until the cache has been populated with at least one record.
    pub fn is_empty(&self) -> bool {
        self.read().departments.is_empty()
    }

    /// Insert all departments and assign display colors by position.
    /// `departments` must already be sorted by name. No-op when already
    /// populated.
    pub fn populate(&self, departments: &[Department]) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        if !entries.departments.is_empty() {
            return;
        }

        debug!(records = departments.len(), "populating department cache");

        for (dept, color) in departments.iter().zip(DEPARTMENT_COLORS) {
            entries.colors.insert(dept.id, color);
        }
        for dept in departments {
            entries.departments.insert(dept.id, dept.clone());
        }
    }

    pub fn get(&self, id: i64) -> Option<Department> {
        self.read().departments.get(&id).cloned()
    }

    /// Snapshot of every cached department, in no particular order.
    pub fn all(&self) -> Vec<Department> {
        self.read().departments.values().cloned().collect()
    }

    /// Display color assigned at population time, if any.
    pub fn color(&self, id: i64) -> Option<i32> {
        self.read().colors.get(&id).copied()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().expect("cache lock poisoned")
    }
}

impl Default for DepartmentCache {
    fn default() -> Self {
        Self::new()
    }
}
