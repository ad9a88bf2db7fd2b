//! The single failure kind returned by every repository operation.

use crate::db::{DbError, DbResult};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, DataProcessingError>;

/// Data-access failure with an operation-specific message and its cause.
///
/// Constraint violations, connectivity failures and unreadable rows all map
/// to this one kind; callers get no finer classification.
#[derive(Debug)]
pub struct DataProcessingError {
    message: String,
    cause: DbError,
    committed_id: Option<i64>,
}

impl DataProcessingError {
    pub fn new(message: impl Into<String>, cause: impl Into<DbError>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
            committed_id: None,
        }
    }

    /// Records the id of a row that was written before the failure.
    pub fn with_committed_id(mut self, id: Option<i64>) -> Self {
        self.committed_id = id;
        self
    }

    /// Human-readable description of the failed operation.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying storage failure.
    pub fn cause(&self) -> &DbError {
        &self.cause
    }

    /// Id generated by an insert that stayed applied when a later statement
    /// of the same operation failed.
    pub fn committed_id(&self) -> Option<i64> {
        self.committed_id
    }
}

impl Display for DataProcessingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.message, self.cause)
    }
}

impl Error for DataProcessingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// Converts a storage result into the repository error at the operation
/// boundary and records the failure.
pub(crate) trait FailWith<T> {
    fn fail_with(self, event: &'static str, message: impl FnOnce() -> String) -> RepoResult<T>;
}

impl<T> FailWith<T> for DbResult<T> {
    fn fail_with(self, event: &'static str, message: impl FnOnce() -> String) -> RepoResult<T> {
        self.map_err(|cause| {
            // Message may carry names and license numbers; log only the cause.
            error!("event={event} module=repo status=error error={cause}");
            DataProcessingError::new(message(), cause)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DataProcessingError, FailWith};
    use crate::db::{DbError, DbResult};
    use std::error::Error;

    #[test]
    fn display_joins_message_and_cause() {
        let err =
            DataProcessingError::new("can't get car with id 3", DbError::MissingIdentity("car"));
        assert_eq!(
            err.to_string(),
            "can't get car with id 3: car has no persisted id"
        );
        assert!(err.source().is_some());
        assert_eq!(err.committed_id(), None);
    }

    #[test]
    fn committed_id_stays_out_of_display() {
        let err = DataProcessingError::new("can't create car", DbError::MissingIdentity("driver"))
            .with_committed_id(Some(12));
        assert_eq!(err.committed_id(), Some(12));
        assert_eq!(err.to_string(), "can't create car: driver has no persisted id");
    }

    #[test]
    fn fail_with_keeps_ok_and_wraps_err() {
        let ok: DbResult<u8> = Ok(7);
        assert_eq!(ok.fail_with("test", || unreachable!()).unwrap(), 7);

        let failed: DbResult<u8> = Err(DbError::MissingIdentity("driver"));
        let err = failed
            .fail_with("test", || "can't do it".to_string())
            .unwrap_err();
        assert_eq!(err.message(), "can't do it");
        assert!(matches!(err.cause(), DbError::MissingIdentity("driver")));
    }
}
