//! Car use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for car aggregate use-cases.
//! - Express driver assignment changes as full aggregate updates.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::car::{Car, CarId};
use crate::model::driver::{Driver, DriverId};
use crate::repo::car_repo::CarRepository;
use crate::repo::error::RepoResult;

/// Use-case service wrapper for car operations.
pub struct CarService<R: CarRepository> {
    repo: R,
}

impl<R: CarRepository> CarService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create(&self, car: Car) -> RepoResult<Car> {
        self.repo.create(car)
    }

    /// Loads one car; `None` also covers live cars without live drivers.
    pub fn get(&self, id: CarId) -> RepoResult<Option<Car>> {
        self.repo.get(id)
    }

    pub fn get_all(&self) -> RepoResult<Vec<Car>> {
        self.repo.get_all()
    }

    pub fn update(&self, car: Car) -> RepoResult<Car> {
        self.repo.update(car)
    }

    pub fn delete(&self, id: CarId) -> RepoResult<bool> {
        self.repo.delete(id)
    }

    /// Cars linked to a driver. Driver lists of the result are empty.
    pub fn get_all_by_driver(&self, driver_id: DriverId) -> RepoResult<Vec<Car>> {
        self.repo.get_all_by_driver(driver_id)
    }

    /// Attaches `driver` and persists the full driver list.
    pub fn add_driver_to_car(&self, driver: Driver, mut car: Car) -> RepoResult<Car> {
        car.add_driver(driver);
        self.repo.update(car)
    }

    /// Detaches every copy of `driver` and persists the remaining list.
    ///
    /// The car is written even when the driver was not attached.
    pub fn remove_driver_from_car(&self, driver: &Driver, mut car: Car) -> RepoResult<Car> {
        car.remove_driver(driver);
        self.repo.update(car)
    }
}
