//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for cars, manufacturers and drivers.
//! - Keep SQL details and row mapping out of service code.
//!
//! # Invariants
//! - Every failure surfaces as `DataProcessingError`; nothing is swallowed.
//! - Soft-deleted rows never appear in any read result.

pub mod car_repo;
pub mod driver_repo;
pub mod error;
pub mod manufacturer_repo;
mod rows;
mod visibility;
