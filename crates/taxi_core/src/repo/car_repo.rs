//! Car repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the car aggregate: the `cars` row plus its `cars_drivers` links.
//! - Rebuild aggregates from the car/manufacturer/driver join in one pass.
//!
//! # Invariants
//! - Reads only return cars whose car, manufacturer and driver rows are live.
//!   The driver join is an inner join, so a car without live drivers is not
//!   returned by `get`/`get_all`.
//! - `update` replaces the whole driver link set; it never merges. An id
//!   with no `cars` row at all fails before any link is touched; a
//!   tombstoned car keeps its tombstone but still gets its links replaced.
//! - `delete` is a tombstone flip; link rows stay in place.
//! - Each call uses exactly one connection and no transaction: a failure
//!   between statements leaves earlier statements applied.

use crate::db::{ConnectionProvider, DbError, DbResult};
use crate::model::car::{Car, CarId};
use crate::model::driver::DriverId;
use crate::repo::error::{FailWith, RepoResult};
use crate::repo::rows::{parse_car, query_car_aggregates, require_driver_ids};
use crate::repo::visibility::all_active;
use log::{debug, warn};
use once_cell::sync::Lazy;
use rusqlite::{params, Connection};

const CAR_AGGREGATE_SELECT_SQL: &str = "SELECT
    c.id AS car_id,
    c.model AS car_model,
    m.id AS manufacturer_id,
    m.name AS manufacturer_name,
    m.country AS manufacturer_country,
    d.id AS driver_id,
    d.name AS driver_name,
    d.license_number AS driver_license_number
FROM cars AS c
INNER JOIN manufacturers AS m ON m.id = c.manufacturer_id
INNER JOIN cars_drivers AS cd ON cd.car_id = c.id
INNER JOIN drivers AS d ON d.id = cd.driver_id";

static CAR_BY_ID_SQL: Lazy<String> = Lazy::new(|| {
    format!(
        "{CAR_AGGREGATE_SELECT_SQL}
         WHERE c.id = ?1
           AND {}
         ORDER BY cd.rowid ASC;",
        all_active(&["c", "m", "d"])
    )
});

static ALL_CARS_SQL: Lazy<String> = Lazy::new(|| {
    format!(
        "{CAR_AGGREGATE_SELECT_SQL}
         WHERE {}
         ORDER BY c.id ASC, cd.rowid ASC;",
        all_active(&["c", "m", "d"])
    )
});

static CARS_BY_DRIVER_SQL: Lazy<String> = Lazy::new(|| {
    format!(
        "SELECT
            c.id AS car_id,
            c.model AS car_model,
            m.id AS manufacturer_id,
            m.name AS manufacturer_name,
            m.country AS manufacturer_country
         FROM drivers AS d
         INNER JOIN cars_drivers AS cd ON cd.driver_id = d.id
         INNER JOIN cars AS c ON c.id = cd.car_id
         INNER JOIN manufacturers AS m ON m.id = c.manufacturer_id
         WHERE d.id = ?1
           AND {}
         ORDER BY cd.rowid ASC;",
        all_active(&["c", "m", "d"])
    )
});

/// Repository interface for the car aggregate.
pub trait CarRepository {
    /// Inserts the car and one link row per attached driver.
    ///
    /// Returns the same car carrying its generated id. When a link insert
    /// fails after the `cars` row is written, the error carries that row's
    /// id in [`committed_id`](crate::DataProcessingError::committed_id).
    fn create(&self, car: Car) -> RepoResult<Car>;
    /// Loads one live car with its manufacturer and live drivers.
    fn get(&self, id: CarId) -> RepoResult<Option<Car>>;
    /// Loads every live car that has at least one live driver.
    fn get_all(&self) -> RepoResult<Vec<Car>>;
    /// Overwrites model and manufacturer, then replaces all driver links.
    ///
    /// Fails with [`DbError::RowNotFound`] when no row has the car's id.
    fn update(&self, car: Car) -> RepoResult<Car>;
    /// Tombstones the car row. Returns whether a row with `id` exists.
    fn delete(&self, id: CarId) -> RepoResult<bool>;
    /// Lists live cars linked to a live driver, one per link row.
    ///
    /// The returned cars have empty driver lists.
    fn get_all_by_driver(&self, driver_id: DriverId) -> RepoResult<Vec<Car>>;
}

/// SQLite-backed car repository.
pub struct SqliteCarRepository<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteCarRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn insert_car(&self, car: &mut Car) -> DbResult<()> {
        car.id = None;
        let manufacturer_id = car
            .manufacturer
            .id
            .ok_or(DbError::MissingIdentity("manufacturer"))?;
        let driver_ids = require_driver_ids(&car.drivers)?;

        let conn = self.provider.connection()?;
        conn.execute(
            "INSERT INTO cars (model, manufacturer_id) VALUES (?1, ?2);",
            params![car.model.as_str(), manufacturer_id],
        )?;
        let car_id = conn.last_insert_rowid();
        car.id = Some(car_id);

        insert_driver_links(&conn, car_id, &driver_ids)
    }

    fn select_car(&self, id: CarId) -> DbResult<Option<Car>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn.prepare(CAR_BY_ID_SQL.as_str())?;
        let cars = query_car_aggregates(&mut stmt, [id])?;
        Ok(cars.into_values().next())
    }

    fn select_all_cars(&self) -> DbResult<Vec<Car>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn.prepare(ALL_CARS_SQL.as_str())?;
        let cars = query_car_aggregates(&mut stmt, [])?;
        Ok(cars.into_values().collect())
    }

    fn update_car(&self, car: &Car) -> DbResult<()> {
        let car_id = car.id.ok_or(DbError::MissingIdentity("car"))?;
        let manufacturer_id = car
            .manufacturer
            .id
            .ok_or(DbError::MissingIdentity("manufacturer"))?;
        let driver_ids = require_driver_ids(&car.drivers)?;

        let conn = self.provider.connection()?;
        let changed = conn.execute(
            "UPDATE cars
             SET
                model = ?1,
                manufacturer_id = ?2
             WHERE id = ?3
               AND is_deleted = 0;",
            params![car.model.as_str(), manufacturer_id, car_id],
        )?;
        if changed == 0 {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM cars WHERE id = ?1);",
                [car_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(DbError::RowNotFound {
                    entity: "car",
                    id: car_id,
                });
            }
            warn!("event=car_update module=repo status=no_row car_id={car_id}");
        }

        conn.execute("DELETE FROM cars_drivers WHERE car_id = ?1;", [car_id])?;
        insert_driver_links(&conn, car_id, &driver_ids)
    }

    fn tombstone_car(&self, id: CarId) -> DbResult<bool> {
        let conn = self.provider.connection()?;
        let changed = conn.execute("UPDATE cars SET is_deleted = 1 WHERE id = ?1;", [id])?;
        Ok(changed != 0)
    }

    fn select_cars_by_driver(&self, driver_id: DriverId) -> DbResult<Vec<Car>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn.prepare(CARS_BY_DRIVER_SQL.as_str())?;
        let cars = stmt
            .query_map([driver_id], parse_car)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cars)
    }
}

impl<P: ConnectionProvider> CarRepository for SqliteCarRepository<P> {
    fn create(&self, mut car: Car) -> RepoResult<Car> {
        let inserted = self.insert_car(&mut car);
        let committed_id = car.id;
        inserted
            .fail_with("car_create", || format!("can't create car {car:?}"))
            .map_err(|err| err.with_committed_id(committed_id))?;
        debug!(
            "event=car_create module=repo status=ok car_id={} drivers={}",
            car.id.unwrap_or_default(),
            car.drivers.len()
        );
        Ok(car)
    }

    fn get(&self, id: CarId) -> RepoResult<Option<Car>> {
        let car = self
            .select_car(id)
            .fail_with("car_get", || format!("can't get car with id {id}"))?;
        debug!(
            "event=car_get module=repo status=ok car_id={id} found={}",
            car.is_some()
        );
        Ok(car)
    }

    fn get_all(&self) -> RepoResult<Vec<Car>> {
        let cars = self
            .select_all_cars()
            .fail_with("car_get_all", || "can't get all cars".to_string())?;
        debug!(
            "event=car_get_all module=repo status=ok count={}",
            cars.len()
        );
        Ok(cars)
    }

    fn update(&self, car: Car) -> RepoResult<Car> {
        self.update_car(&car)
            .fail_with("car_update", || format!("can't update car {car:?}"))?;
        debug!(
            "event=car_update module=repo status=ok car_id={} drivers={}",
            car.id.unwrap_or_default(),
            car.drivers.len()
        );
        Ok(car)
    }

    fn delete(&self, id: CarId) -> RepoResult<bool> {
        let deleted = self
            .tombstone_car(id)
            .fail_with("car_delete", || format!("can't delete car with id {id}"))?;
        debug!("event=car_delete module=repo status=ok car_id={id} deleted={deleted}");
        Ok(deleted)
    }

    fn get_all_by_driver(&self, driver_id: DriverId) -> RepoResult<Vec<Car>> {
        let cars = self.select_cars_by_driver(driver_id).fail_with(
            "car_get_all_by_driver",
            || format!("can't get all cars by driver with id {driver_id}"),
        )?;
        debug!(
            "event=car_get_all_by_driver module=repo status=ok driver_id={driver_id} count={}",
            cars.len()
        );
        Ok(cars)
    }
}

fn insert_driver_links(conn: &Connection, car_id: CarId, driver_ids: &[DriverId]) -> DbResult<()> {
    let mut stmt =
        conn.prepare_cached("INSERT INTO cars_drivers (car_id, driver_id) VALUES (?1, ?2);")?;
    for driver_id in driver_ids {
        stmt.execute(params![car_id, driver_id])?;
    }
    Ok(())
}
