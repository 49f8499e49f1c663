//! Account service errors and their plain-text rendering.

use hobbyhub_auth::PasswordError;
use hobbyhub_storage::StorageError;

use crate::cache::CacheError;

/// Account operation that produced an error.
///
/// Generic failures are reported with a per-operation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    UpdateHobbies,
    ClearCache,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::UpdateHobbies => "update_hobbies",
            Self::ClearCache => "clear_cache",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Self::Register => "Error registering user",
            Self::Login => "Error logging in",
            Self::UpdateHobbies => "Error updating hobbies",
            Self::ClearCache => "Error clearing cache",
        }
    }
}

/// Errors returned by [`AccountService`](super::AccountService).
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("user already exists: {username}")]
    AlreadyExists { username: String },

    #[error("user not found: {username}")]
    NotFound { username: String },

    #[error("wrong password")]
    WrongPassword,

    #[error("password verification failed: {0}")]
    Verification(#[from] PasswordError),

    #[error("credential store unavailable: {0}")]
    StoreUnavailable(StorageError),

    #[error("cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),

    #[error("operation failed: {message}")]
    OperationFailed { message: String },
}

impl AccountError {
    pub fn not_found(username: impl Into<String>) -> Self {
        Self::NotFound {
            username: username.into(),
        }
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
        }
    }

    /// Plain-text message shown to the caller.
    ///
    /// Only the credential outcomes of register and login get a specific
    /// message; everything else collapses to the operation's generic text.
    pub fn user_message(&self, operation: Operation) -> &'static str {
        match (self, operation) {
            (Self::AlreadyExists { .. }, Operation::Register) => "User already exists!",
            (Self::NotFound { .. }, Operation::Login) => "User not found",
            (Self::WrongPassword, Operation::Login) => "Wrong password",
            _ => operation.failure_message(),
        }
    }

    /// Whether the failure is an expected outcome of user input rather than
    /// a fault.
    pub fn is_client_outcome(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists { .. } | Self::NotFound { .. } | Self::WrongPassword
        )
    }
}

impl From<StorageError> for AccountError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AlreadyExists { username } => Self::AlreadyExists { username },
            StorageError::ConnectionError { .. } => Self::StoreUnavailable(err),
            StorageError::Internal { message } => Self::OperationFailed { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let exists = AccountError::AlreadyExists {
            username: "a".into(),
        };
        assert_eq!(exists.user_message(Operation::Register), "User already exists!");
        assert_eq!(
            AccountError::not_found("a").user_message(Operation::Login),
            "User not found"
        );
        assert_eq!(
            AccountError::WrongPassword.user_message(Operation::Login),
            "Wrong password"
        );
        assert_eq!(
            AccountError::not_found("a").user_message(Operation::UpdateHobbies),
            "Error updating hobbies"
        );
        assert_eq!(
            AccountError::StoreUnavailable(StorageError::connection_error("down"))
                .user_message(Operation::Register),
            "Error registering user"
        );
        assert_eq!(
            AccountError::CacheUnavailable(CacheError::Connection("refused".into()))
                .user_message(Operation::Login),
            "Error logging in"
        );
    }

    #[test]
    fn test_storage_error_mapping() {
        assert!(matches!(
            AccountError::from(StorageError::already_exists("a")),
            AccountError::AlreadyExists { .. }
        ));
        assert!(matches!(
            AccountError::from(StorageError::connection_error("x")),
            AccountError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AccountError::from(StorageError::internal("x")),
            AccountError::OperationFailed { .. }
        ));
        assert!(!AccountError::operation_failed("x").is_client_outcome());
        assert!(AccountError::WrongPassword.is_client_outcome());
    }
}
