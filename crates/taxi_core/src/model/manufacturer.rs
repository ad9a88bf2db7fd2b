//! Manufacturer model.

use serde::{Deserialize, Serialize};

/// Database identity of a manufacturer row.
pub type ManufacturerId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: Option<ManufacturerId>,
    pub name: String,
    pub country: String,
    pub is_deleted: bool,
}

impl Manufacturer {
    /// Creates a manufacturer that has not been persisted yet.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: country.into(),
            is_deleted: false,
        }
    }

    /// Creates a manufacturer handle for an already persisted row.
    pub fn with_id(
        id: ManufacturerId,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, country)
        }
    }
}
