//! Connection providers used by repositories.
//!
//! # Responsibility
//! - Supply one ready-to-use connection per repository call.
//!
//! # Invariants
//! - Every returned connection went through `open` bootstrap.
//! - The caller owns the connection; dropping it releases it on every path.

use super::open::{open_db, open_shared_memory_db};
use super::DbResult;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Source of bootstrapped connections.
pub trait ConnectionProvider {
    /// Acquires a fresh connection for the duration of one operation.
    fn connection(&self) -> DbResult<Connection>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    fn connection(&self) -> DbResult<Connection> {
        (**self).connection()
    }
}

/// Opens the same database file on every call.
#[derive(Debug, Clone)]
pub struct FileConnectionProvider {
    path: PathBuf,
}

impl FileConnectionProvider {
    /// Creates the provider and bootstraps the file once so schema errors
    /// surface at wiring time instead of on the first query.
    pub fn try_new(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        drop(open_db(&path)?);
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConnectionProvider for FileConnectionProvider {
    fn connection(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}

/// Process-local in-memory database shared by every connection it hands out.
///
/// SQLite discards a shared-cache memory database when its last connection
/// closes, so the provider keeps one anchor connection for its own lifetime.
pub struct MemoryConnectionProvider {
    name: String,
    _anchor: Connection,
}

impl MemoryConnectionProvider {
    /// Creates a new, empty database with a unique name.
    pub fn try_new() -> DbResult<Self> {
        let name = format!("taxi-{}", Uuid::new_v4().simple());
        let anchor = open_shared_memory_db(&name)?;
        Ok(Self {
            name,
            _anchor: anchor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ConnectionProvider for MemoryConnectionProvider {
    fn connection(&self) -> DbResult<Connection> {
        open_shared_memory_db(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConnectionProvider, MemoryConnectionProvider};

    #[test]
    fn memory_connections_share_one_database() {
        let provider = MemoryConnectionProvider::try_new().unwrap();

        let first = provider.connection().unwrap();
        first
            .execute(
                "INSERT INTO manufacturers (name, country) VALUES ('Mini', 'England');",
                [],
            )
            .unwrap();
        drop(first);

        let second = provider.connection().unwrap();
        let count: i64 = second
            .query_row("SELECT COUNT(*) FROM manufacturers;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn memory_providers_are_isolated() {
        let left = MemoryConnectionProvider::try_new().unwrap();
        let right = MemoryConnectionProvider::try_new().unwrap();
        assert_ne!(left.name(), right.name());

        left.connection()
            .unwrap()
            .execute(
                "INSERT INTO drivers (name, license_number) VALUES ('Ann', 'X1');",
                [],
            )
            .unwrap();

        let count: i64 = right
            .connection()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM drivers;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
