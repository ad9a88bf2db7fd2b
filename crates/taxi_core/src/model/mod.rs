//! Domain model for the car aggregate.
//!
//! # Responsibility
//! - Define plain data holders for cars, manufacturers and drivers.
//!
//! # Invariants
//! - `id` is `None` until the row has been persisted.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod car;
pub mod driver;
pub mod manufacturer;
