//! Persistence core for the taxi domain: cars, manufacturers and drivers.
//!
//! The car repository maps the `cars`/`cars_drivers` rows to the in-memory
//! car aggregate; manufacturer and driver repositories cover the rows it
//! references.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{
    ConnectionProvider, DbError, DbResult, FileConnectionProvider, MemoryConnectionProvider,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::car::{Car, CarId};
pub use model::driver::{Driver, DriverId};
pub use model::manufacturer::{Manufacturer, ManufacturerId};
pub use repo::car_repo::{CarRepository, SqliteCarRepository};
pub use repo::driver_repo::{DriverRepository, SqliteDriverRepository};
pub use repo::error::{DataProcessingError, RepoResult};
pub use repo::manufacturer_repo::{ManufacturerRepository, SqliteManufacturerRepository};
pub use service::car_service::CarService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
