//! Error types for the PostgreSQL storage backend.

use hobbyhub_storage::StorageError;
use sqlx_core::error::Error as SqlxError;

/// PostgreSQL error code for unique constraint violations (23505).
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// Checks if a sqlx error has a specific PostgreSQL error code.
pub fn has_pg_error_code(err: &SqlxError, code: &str) -> bool {
    if let SqlxError::Database(db_err) = err {
        db_err.code().as_deref() == Some(code)
    } else {
        false
    }
}

/// Checks if a sqlx error is a unique constraint violation (23505).
pub fn is_unique_violation(err: &SqlxError) -> bool {
    has_pg_error_code(err, PG_UNIQUE_VIOLATION)
}

/// Errors specific to the PostgreSQL storage backend.
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    /// Database connection or query error.
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx_core::error::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PostgresError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<PostgresError> for StorageError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::Connection(e) => sqlx_to_storage(e),
            PostgresError::Migration(e) => StorageError::internal(format!("Migration error: {e}")),
            PostgresError::Config { message } => {
                StorageError::internal(format!("Configuration error: {message}"))
            }
        }
    }
}

/// Maps a sqlx error from a query into the storage taxonomy.
///
/// Pool and I/O failures become `ConnectionError`; everything else is `Internal`.
pub(crate) fn sqlx_to_storage(err: SqlxError) -> StorageError {
    match err {
        SqlxError::PoolTimedOut
        | SqlxError::PoolClosed
        | SqlxError::Io(_)
        | SqlxError::Tls(_)
        | SqlxError::WorkerCrashed => StorageError::connection_error(err.to_string()),
        other => StorageError::internal(other.to_string()),
    }
}

/// Result type alias for PostgreSQL operations.
pub type Result<T> = std::result::Result<T, PostgresError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_connection() {
        let storage: StorageError = PostgresError::Connection(SqlxError::PoolTimedOut).into();
        assert!(storage.is_connection_error());
    }

    #[test]
    fn test_config_error_maps_to_internal() {
        let storage: StorageError = PostgresError::config("bad url").into();
        assert_eq!(storage.to_string(), "Internal error: Configuration error: bad url");
    }

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&SqlxError::PoolClosed));
    }
}
