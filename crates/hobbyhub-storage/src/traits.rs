//! Storage traits for the account storage abstraction layer.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{Account, HobbyMutation, NewAccount};

/// The storage trait that every credential store must implement.
///
/// Implementations must be thread-safe (`Send + Sync`); a single instance is
/// shared by all in-flight requests.
///
/// # Example
///
/// ```ignore
/// use hobbyhub_storage::{AccountStorage, StorageError, Account};
///
/// async fn hobby_count(storage: &dyn AccountStorage, name: &str) -> Result<usize, StorageError> {
///     let account: Option<Account> = storage.find(name).await?;
///     Ok(account.map_or(0, |a| a.hobbies.len()))
/// }
/// ```
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Reads an account by username.
    ///
    /// Returns `None` if no account with that username exists.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing accounts.
    async fn find(&self, username: &str) -> Result<Option<Account>, StorageError>;

    /// Creates a new account with an empty hobby list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if the username is already taken.
    /// Backends must enforce this atomically, independent of any prior `find`.
    async fn create(&self, account: &NewAccount) -> Result<Account, StorageError>;

    /// Applies a mutation to the hobby list of `username`.
    ///
    /// A mutation for an unknown username is a no-op. Returns the number of
    /// accounts touched (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn mutate_hobbies(
        &self,
        username: &str,
        mutation: &HobbyMutation,
    ) -> Result<u64, StorageError>;

    /// Returns the name of the storage backend (for logging).
    fn backend_name(&self) -> &'static str;
}
