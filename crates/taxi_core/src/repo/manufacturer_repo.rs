//! Manufacturer repository contracts and SQLite implementation.

use crate::db::{ConnectionProvider, DbError, DbResult};
use crate::model::manufacturer::{Manufacturer, ManufacturerId};
use crate::repo::error::{FailWith, RepoResult};
use crate::repo::rows::parse_manufacturer;
use crate::repo::visibility::active;
use log::{debug, warn};
use once_cell::sync::Lazy;
use rusqlite::{params, OptionalExtension};

const MANUFACTURER_SELECT_SQL: &str = "SELECT
    m.id AS manufacturer_id,
    m.name AS manufacturer_name,
    m.country AS manufacturer_country
FROM manufacturers AS m";

static MANUFACTURER_BY_ID_SQL: Lazy<String> = Lazy::new(|| {
    format!(
        "{MANUFACTURER_SELECT_SQL} WHERE m.id = ?1 AND {};",
        active("m")
    )
});

static ALL_MANUFACTURERS_SQL: Lazy<String> = Lazy::new(|| {
    format!(
        "{MANUFACTURER_SELECT_SQL} WHERE {} ORDER BY m.id ASC;",
        active("m")
    )
});

/// Repository interface for manufacturers.
pub trait ManufacturerRepository {
    fn create(&self, manufacturer: Manufacturer) -> RepoResult<Manufacturer>;
    fn get(&self, id: ManufacturerId) -> RepoResult<Option<Manufacturer>>;
    fn get_all(&self) -> RepoResult<Vec<Manufacturer>>;
    fn update(&self, manufacturer: Manufacturer) -> RepoResult<Manufacturer>;
    fn delete(&self, id: ManufacturerId) -> RepoResult<bool>;
}

/// SQLite-backed manufacturer repository.
pub struct SqliteManufacturerRepository<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteManufacturerRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn insert(&self, manufacturer: &Manufacturer) -> DbResult<ManufacturerId> {
        let conn = self.provider.connection()?;
        conn.execute(
            "INSERT INTO manufacturers (name, country) VALUES (?1, ?2);",
            params![manufacturer.name.as_str(), manufacturer.country.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn select(&self, id: ManufacturerId) -> DbResult<Option<Manufacturer>> {
        let conn = self.provider.connection()?;
        let manufacturer = conn
            .query_row(MANUFACTURER_BY_ID_SQL.as_str(), [id], parse_manufacturer)
            .optional()?;
        Ok(manufacturer)
    }

    fn select_all(&self) -> DbResult<Vec<Manufacturer>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn.prepare(ALL_MANUFACTURERS_SQL.as_str())?;
        let manufacturers = stmt
            .query_map([], parse_manufacturer)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(manufacturers)
    }

    fn overwrite(&self, manufacturer: &Manufacturer) -> DbResult<usize> {
        let id = manufacturer
            .id
            .ok_or(DbError::MissingIdentity("manufacturer"))?;
        let conn = self.provider.connection()?;
        let changed = conn.execute(
            "UPDATE manufacturers
             SET
                name = ?1,
                country = ?2
             WHERE id = ?3
               AND is_deleted = 0;",
            params![
                manufacturer.name.as_str(),
                manufacturer.country.as_str(),
                id
            ],
        )?;
        Ok(changed)
    }

    fn tombstone(&self, id: ManufacturerId) -> DbResult<bool> {
        let conn = self.provider.connection()?;
        let changed = conn.execute(
            "UPDATE manufacturers SET is_deleted = 1 WHERE id = ?1;",
            [id],
        )?;
        Ok(changed != 0)
    }
}

impl<P: ConnectionProvider> ManufacturerRepository for SqliteManufacturerRepository<P> {
    fn create(&self, mut manufacturer: Manufacturer) -> RepoResult<Manufacturer> {
        let id = self.insert(&manufacturer).fail_with("manufacturer_create", || {
            format!("can't create manufacturer {manufacturer:?}")
        })?;
        manufacturer.id = Some(id);
        debug!("event=manufacturer_create module=repo status=ok manufacturer_id={id}");
        Ok(manufacturer)
    }

    fn get(&self, id: ManufacturerId) -> RepoResult<Option<Manufacturer>> {
        self.select(id).fail_with("manufacturer_get", || {
            format!("can't get manufacturer with id {id}")
        })
    }

    fn get_all(&self) -> RepoResult<Vec<Manufacturer>> {
        self.select_all().fail_with("manufacturer_get_all", || {
            "can't get all manufacturers".to_string()
        })
    }

    fn update(&self, manufacturer: Manufacturer) -> RepoResult<Manufacturer> {
        let changed = self.overwrite(&manufacturer).fail_with("manufacturer_update", || {
            format!("can't update manufacturer {manufacturer:?}")
        })?;
        if changed == 0 {
            warn!(
                "event=manufacturer_update module=repo status=no_row manufacturer_id={}",
                manufacturer.id.unwrap_or_default()
            );
        }
        Ok(manufacturer)
    }

    fn delete(&self, id: ManufacturerId) -> RepoResult<bool> {
        self.tombstone(id).fail_with("manufacturer_delete", || {
            format!("can't delete manufacturer with id {id}")
        })
    }
}
