//! Translate pool and Diesel failures into repository port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// How a Diesel failure should be reported by a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    /// Connection lost or never established.
    Connection,
    /// A unique constraint rejected the write.
    UniqueViolation,
    /// Any other execution failure.
    Query,
}

/// Classify a Diesel error and log its details at debug level.
pub(crate) fn classify(error: &DieselError) -> (FailureKind, &'static str) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (FailureKind::Connection, "database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            (FailureKind::UniqueViolation, "unique constraint violated")
        }
        DieselError::NotFound => (FailureKind::Query, "record not found"),
        DieselError::QueryBuilderError(_) => (FailureKind::Query, "database query error"),
        _ => (FailureKind::Query, "database error"),
    }
}

/// Pool failures always surface as connection errors.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}
