//! Row-to-model mapping for joined result sets.
//!
//! # Invariants
//! - Columns are always read through their `AS` aliases; joined tables share
//!   `id` and `name`, so unqualified names would be ambiguous.
//! - Rows returned by the repositories are already filtered to live rows, so
//!   parsed models always carry `is_deleted = false`.

use crate::db::{DbError, DbResult};
use crate::model::car::{Car, CarId};
use crate::model::driver::{Driver, DriverId};
use crate::model::manufacturer::{Manufacturer, ManufacturerId};
use rusqlite::{Params, Row, Statement};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Collects the persisted ids of attached drivers, failing on the first
/// driver that was never saved.
pub(crate) fn require_driver_ids(drivers: &[Driver]) -> DbResult<Vec<DriverId>> {
    drivers
        .iter()
        .map(|driver| driver.id.ok_or(DbError::MissingIdentity("driver")))
        .collect()
}

pub(crate) fn parse_manufacturer(row: &Row<'_>) -> rusqlite::Result<Manufacturer> {
    Ok(Manufacturer::with_id(
        row.get::<_, ManufacturerId>("manufacturer_id")?,
        row.get::<_, String>("manufacturer_name")?,
        row.get::<_, String>("manufacturer_country")?,
    ))
}

pub(crate) fn parse_driver(row: &Row<'_>) -> rusqlite::Result<Driver> {
    Ok(Driver::with_id(
        row.get::<_, DriverId>("driver_id")?,
        row.get::<_, String>("driver_name")?,
        row.get::<_, String>("driver_license_number")?,
    ))
}

/// Parses the car columns of a row; the driver list is left empty.
pub(crate) fn parse_car(row: &Row<'_>) -> rusqlite::Result<Car> {
    let manufacturer = parse_manufacturer(row)?;
    Ok(Car::with_id(
        row.get::<_, CarId>("car_id")?,
        row.get::<_, String>("car_model")?,
        manufacturer,
    ))
}

/// One fan-out row of the car/manufacturer/driver join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CarDriverRow {
    pub car_id: CarId,
    pub car: Car,
    pub driver: Driver,
}

pub(crate) fn parse_car_driver_row(row: &Row<'_>) -> rusqlite::Result<CarDriverRow> {
    Ok(CarDriverRow {
        car_id: row.get("car_id")?,
        car: parse_car(row)?,
        driver: parse_driver(row)?,
    })
}

/// Runs a fan-out query and folds its rows into one car per identity.
pub(crate) fn query_car_aggregates<P: Params>(
    stmt: &mut Statement<'_>,
    params: P,
) -> rusqlite::Result<BTreeMap<CarId, Car>> {
    let rows = stmt.query_map(params, parse_car_driver_row)?;
    group_by_car(rows)
}

/// Group-by-key reduction over fan-out rows.
///
/// The first row seen for a car id materializes the car and its
/// manufacturer; every row, the first included, appends its driver.
pub(crate) fn group_by_car<E>(
    rows: impl IntoIterator<Item = Result<CarDriverRow, E>>,
) -> Result<BTreeMap<CarId, Car>, E> {
    let mut cars: BTreeMap<CarId, Car> = BTreeMap::new();
    for row in rows {
        let CarDriverRow {
            car_id,
            car,
            driver,
        } = row?;
        match cars.entry(car_id) {
            Entry::Occupied(entry) => entry.into_mut().add_driver(driver),
            Entry::Vacant(entry) => entry.insert(car).add_driver(driver),
        }
    }
    Ok(cars)
}
