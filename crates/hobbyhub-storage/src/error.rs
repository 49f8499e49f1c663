//! Storage error types for the account storage abstraction layer.
//!
//! A missing account is not an error: lookups return `Ok(None)` and
//! mutations report zero affected rows.

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Attempted to create an account whose username is already taken.
    #[error("Account already exists: {username}")]
    AlreadyExists {
        /// The username that is already taken.
        username: String,
    },

    /// Failed to reach the storage backend.
    #[error("Connection error: {message}")]
    ConnectionError {
        /// Description of the connection error.
        message: String,
    },

    /// An internal storage error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `AlreadyExists` error.
    #[must_use]
    pub fn already_exists(username: impl Into<String>) -> Self {
        Self::AlreadyExists {
            username: username.into(),
        }
    }

    /// Creates a new `ConnectionError` error.
    #[must_use]
    pub fn connection_error(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an already exists error.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns `true` if the backend could not be reached.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::already_exists("bob");
        assert_eq!(err.to_string(), "Account already exists: bob");

        let err = StorageError::connection_error("refused");
        assert_eq!(err.to_string(), "Connection error: refused");

        let err = StorageError::internal("bad row");
        assert_eq!(err.to_string(), "Internal error: bad row");
    }

    #[test]
    fn test_error_predicates() {
        let err = StorageError::already_exists("alice");
        assert!(err.is_already_exists());
        assert!(!err.is_connection_error());

        let err = StorageError::connection_error("down");
        assert!(!err.is_already_exists());
        assert!(err.is_connection_error());
    }
}
