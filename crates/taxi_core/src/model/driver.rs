//! Driver model.

use serde::{Deserialize, Serialize};

/// Database identity of a driver row.
pub type DriverId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Option<DriverId>,
    pub name: String,
    pub license_number: String,
    pub is_deleted: bool,
}

impl Driver {
    /// Creates a driver that has not been persisted yet.
    pub fn new(name: impl Into<String>, license_number: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            license_number: license_number.into(),
            is_deleted: false,
        }
    }

    /// Creates a driver handle for an already persisted row.
    pub fn with_id(
        id: DriverId,
        name: impl Into<String>,
        license_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, license_number)
        }
    }
}
