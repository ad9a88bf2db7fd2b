//! Car aggregate model.
//!
//! # Responsibility
//! - Hold one car together with its manufacturer and attached drivers.
//!
//! # Invariants
//! - A car always has exactly one manufacturer.
//! - `drivers` keeps insertion order and may contain the same driver twice;
//!   uniqueness is not enforced at the model layer.

use crate::model::driver::{Driver, DriverId};
use crate::model::manufacturer::Manufacturer;
use serde::{Deserialize, Serialize};

/// Database identity of a car row.
pub type CarId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: Option<CarId>,
    pub model: String,
    pub manufacturer: Manufacturer,
    pub drivers: Vec<Driver>,
    pub is_deleted: bool,
}

impl Car {
    /// Creates a car without identity and without drivers.
    pub fn new(model: impl Into<String>, manufacturer: Manufacturer) -> Self {
        Self {
            id: None,
            model: model.into(),
            manufacturer,
            drivers: Vec::new(),
            is_deleted: false,
        }
    }

    /// Creates a car handle for an already persisted row.
    pub fn with_id(id: CarId, model: impl Into<String>, manufacturer: Manufacturer) -> Self {
        Self {
            id: Some(id),
            ..Self::new(model, manufacturer)
        }
    }

    /// Appends one driver to the end of the driver list.
    pub fn add_driver(&mut self, driver: Driver) {
        self.drivers.push(driver);
    }

    /// Removes every attached driver with the same identity as `driver`.
    ///
    /// Returns whether anything was removed. Drivers without identity are
    /// compared by full value.
    pub fn remove_driver(&mut self, driver: &Driver) -> bool {
        let before = self.drivers.len();
        match driver.id {
            Some(id) => self.drivers.retain(|current| current.id != Some(id)),
            None => self.drivers.retain(|current| current != driver),
        }
        self.drivers.len() != before
    }

    /// Identities of the attached drivers, in list order.
    ///
    /// Drivers that were never persisted have no identity and are skipped.
    pub fn driver_ids(&self) -> Vec<DriverId> {
        self.drivers.iter().filter_map(|driver| driver.id).collect()
    }
}
