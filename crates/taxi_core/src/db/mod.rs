//! SQLite storage bootstrap, schema migrations and connection providers.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the taxi core.
//! - Apply schema migrations in deterministic order.
//! - Hand out one bootstrapped connection per repository call.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Repositories never touch a connection that has not been bootstrapped.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod provider;

pub use open::{open_db, open_shared_memory_db};
pub use provider::{ConnectionProvider, FileConnectionProvider, MemoryConnectionProvider};

pub type DbResult<T> = Result<T, DbError>;

/// Low-level cause of a storage failure.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// An entity that must already be persisted has no identity yet.
    MissingIdentity(&'static str),
    /// No row, live or tombstoned, carries the id.
    RowNotFound { entity: &'static str, id: i64 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::MissingIdentity(entity) => write!(f, "{entity} has no persisted id"),
            Self::RowNotFound { entity, id } => write!(f, "no {entity} row with id {id}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::MissingIdentity(_) | Self::RowNotFound { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
