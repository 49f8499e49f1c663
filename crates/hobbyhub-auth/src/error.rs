//! Password hashing and verification error types.

/// Errors that can occur while hashing or verifying a password.
///
/// A wrong password is not an error: verification returns `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Computing a new hash failed.
    #[error("Hashing failed: {message}")]
    Hashing {
        /// Description of the failure.
        message: String,
    },

    /// The stored hash could not be parsed.
    #[error("Malformed password hash: {message}")]
    MalformedHash {
        /// Description of why the hash is malformed.
        message: String,
    },

    /// The blocking hashing task panicked or was cancelled.
    #[error("Password task failed: {message}")]
    TaskFailed {
        /// Description of the join error.
        message: String,
    },
}

impl PasswordError {
    /// Creates a new `Hashing` error.
    #[must_use]
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    /// Creates a new `MalformedHash` error.
    #[must_use]
    pub fn malformed_hash(message: impl Into<String>) -> Self {
        Self::MalformedHash {
            message: message.into(),
        }
    }

    /// Creates a new `TaskFailed` error.
    #[must_use]
    pub fn task_failed(message: impl Into<String>) -> Self {
        Self::TaskFailed {
            message: message.into(),
        }
    }
}

impl From<tokio::task::JoinError> for PasswordError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::task_failed(err.to_string())
    }
}
