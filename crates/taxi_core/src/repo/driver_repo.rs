//! Driver repository contracts and SQLite implementation.

use crate::db::{ConnectionProvider, DbError, DbResult};
use crate::model::driver::{Driver, DriverId};
use crate::repo::error::{FailWith, RepoResult};
use crate::repo::rows::parse_driver;
use crate::repo::visibility::active;
use log::{debug, warn};
use once_cell::sync::Lazy;
use rusqlite::{params, OptionalExtension};

const DRIVER_SELECT_SQL: &str = "SELECT
    d.id AS driver_id,
    d.name AS driver_name,
    d.license_number AS driver_license_number
FROM drivers AS d";

static DRIVER_BY_ID_SQL: Lazy<String> =
    Lazy::new(|| format!("{DRIVER_SELECT_SQL} WHERE d.id = ?1 AND {};", active("d")));

static ALL_DRIVERS_SQL: Lazy<String> =
    Lazy::new(|| format!("{DRIVER_SELECT_SQL} WHERE {} ORDER BY d.id ASC;", active("d")));

/// Repository interface for drivers.
pub trait DriverRepository {
    fn create(&self, driver: Driver) -> RepoResult<Driver>;
    fn get(&self, id: DriverId) -> RepoResult<Option<Driver>>;
    fn get_all(&self) -> RepoResult<Vec<Driver>>;
    fn update(&self, driver: Driver) -> RepoResult<Driver>;
    fn delete(&self, id: DriverId) -> RepoResult<bool>;
}

/// SQLite-backed driver repository.
pub struct SqliteDriverRepository<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteDriverRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn insert(&self, driver: &Driver) -> DbResult<DriverId> {
        let conn = self.provider.connection()?;
        conn.execute(
            "INSERT INTO drivers (name, license_number) VALUES (?1, ?2);",
            params![driver.name.as_str(), driver.license_number.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn select(&self, id: DriverId) -> DbResult<Option<Driver>> {
        let conn = self.provider.connection()?;
        let driver = conn
            .query_row(DRIVER_BY_ID_SQL.as_str(), [id], parse_driver)
            .optional()?;
        Ok(driver)
    }

    fn select_all(&self) -> DbResult<Vec<Driver>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn.prepare(ALL_DRIVERS_SQL.as_str())?;
        let drivers = stmt
            .query_map([], parse_driver)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(drivers)
    }

    fn overwrite(&self, driver: &Driver) -> DbResult<usize> {
        let id = driver.id.ok_or(DbError::MissingIdentity("driver"))?;
        let conn = self.provider.connection()?;
        let changed = conn.execute(
            "UPDATE drivers
             SET
                name = ?1,
                license_number = ?2
             WHERE id = ?3
               AND is_deleted = 0;",
            params![driver.name.as_str(), driver.license_number.as_str(), id],
        )?;
        Ok(changed)
    }

    fn tombstone(&self, id: DriverId) -> DbResult<bool> {
        let conn = self.provider.connection()?;
        let changed = conn.execute("UPDATE drivers SET is_deleted = 1 WHERE id = ?1;", [id])?;
        Ok(changed != 0)
    }
}

impl<P: ConnectionProvider> DriverRepository for SqliteDriverRepository<P> {
    fn create(&self, mut driver: Driver) -> RepoResult<Driver> {
        let id = self
            .insert(&driver)
            .fail_with("driver_create", || format!("can't create driver {driver:?}"))?;
        driver.id = Some(id);
        debug!("event=driver_create module=repo status=ok driver_id={id}");
        Ok(driver)
    }

    fn get(&self, id: DriverId) -> RepoResult<Option<Driver>> {
        self.select(id)
            .fail_with("driver_get", || format!("can't get driver with id {id}"))
    }

    fn get_all(&self) -> RepoResult<Vec<Driver>> {
        self.select_all()
            .fail_with("driver_get_all", || "can't get all drivers".to_string())
    }

    fn update(&self, driver: Driver) -> RepoResult<Driver> {
        let changed = self
            .overwrite(&driver)
            .fail_with("driver_update", || format!("can't update driver {driver:?}"))?;
        if changed == 0 {
            warn!(
                "event=driver_update module=repo status=no_row driver_id={}",
                driver.id.unwrap_or_default()
            );
        }
        Ok(driver)
    }

    fn delete(&self, id: DriverId) -> RepoResult<bool> {
        self.tombstone(id)
            .fail_with("driver_delete", || format!("can't delete driver with id {id}"))
    }
}
