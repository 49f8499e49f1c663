//! Account orchestration: registration, cache-first login and hobby updates.

use std::time::Duration;

use hobbyhub_auth::PasswordHasher;
use hobbyhub_storage::{Account, DynAccountStorage, HobbyMutation, NewAccount};
use tracing::instrument;

use super::error::AccountError;
use crate::cache::{CacheBackend, UserSnapshot, cache_key};

/// Tunables for [`AccountService`].
#[derive(Debug, Clone)]
pub struct AccountSettings {
    /// Lifetime of each `user:<name>` cache entry.
    pub user_ttl: Duration,
    /// Re-check the store when a cached hash rejects the password.
    pub verify_store_on_cache_mismatch: bool,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            user_ttl: Duration::from_secs(3600),
            verify_store_on_cache_mismatch: false,
        }
    }
}

/// Where a successful login found the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginSource {
    Cache,
    Store,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub hobbies: Vec<String>,
    pub source: LoginSource,
}

/// Account operations over an injected credential store and cache.
///
/// The store is authoritative. The cache holds a snapshot per user that is
/// written after a store-backed login and after every hobby update. There
/// is no transaction across a store write and the cache write that follows
/// it, so concurrent updates for one user may leave the cache a step behind
/// until the next write or expiry.
pub struct AccountService {
    storage: DynAccountStorage,
    cache: CacheBackend,
    hasher: PasswordHasher,
    settings: AccountSettings,
}

impl AccountService {
    pub fn new(
        storage: DynAccountStorage,
        cache: CacheBackend,
        hasher: PasswordHasher,
        settings: AccountSettings,
    ) -> Self {
        Self {
            storage,
            cache,
            hasher,
            settings,
        }
    }

    pub fn cache(&self) -> &CacheBackend {
        &self.cache
    }

    /// Creates an account with an empty hobby list.
    ///
    /// Does not touch the cache.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AccountError> {
        if self.storage.find(username).await?.is_some() {
            return Err(AccountError::AlreadyExists {
                username: username.to_string(),
            });
        }

        let password_hash = self.hasher.hash(password).await?;
        // A concurrent registration that won the race surfaces as AlreadyExists here.
        self.storage
            .create(&NewAccount::new(username, password_hash))
            .await?;

        tracing::info!(backend = self.storage.backend_name(), "account registered");
        Ok(())
    }

    /// Verifies credentials, consulting the cache before the store.
    ///
    /// A cache hit whose hash rejects the password answers
    /// [`AccountError::WrongPassword`] without reading the store, unless
    /// `verify_store_on_cache_mismatch` is set.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AccountError> {
        let key = cache_key(username);

        if let Some(snapshot) = self.cached_snapshot(&key).await? {
            if self.hasher.verify(password, &snapshot.password).await? {
                tracing::debug!(hobbies = snapshot.hobbies.len(), "login served from cache");
                return Ok(LoginOutcome {
                    hobbies: snapshot.hobbies,
                    source: LoginSource::Cache,
                });
            }
            if !self.settings.verify_store_on_cache_mismatch {
                return Err(AccountError::WrongPassword);
            }
            tracing::debug!("cached hash rejected password, re-checking store");
        }

        let account = self
            .storage
            .find(username)
            .await?
            .ok_or_else(|| AccountError::not_found(username))?;

        if !self.hasher.verify(password, &account.password_hash).await? {
            return Err(AccountError::WrongPassword);
        }

        self.write_snapshot(&key, &account).await?;
        tracing::debug!(hobbies = account.hobbies.len(), "login served from store");
        Ok(LoginOutcome {
            hobbies: account.hobbies,
            source: LoginSource::Store,
        })
    }

    /// Appends `label` to the user's hobbies.
    pub async fn add_hobby(&self, username: &str, label: &str) -> Result<Vec<String>, AccountError> {
        self.update_hobbies(username, HobbyMutation::add(label))
            .await
    }

    /// Removes every occurrence of `label`.
    pub async fn remove_hobby(
        &self,
        username: &str,
        label: &str,
    ) -> Result<Vec<String>, AccountError> {
        self.update_hobbies(username, HobbyMutation::remove(label))
            .await
    }

    /// Replaces every occurrence of `from` with `to`, keeping positions.
    pub async fn rename_hobby(
        &self,
        username: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, AccountError> {
        self.update_hobbies(username, HobbyMutation::rename(from, to))
            .await
    }

    /// Drops every cache entry. Later logins fall back to the store.
    #[instrument(skip(self))]
    pub async fn clear_cache(&self) -> Result<(), AccountError> {
        self.cache.flush().await?;
        Ok(())
    }

    /// Mutates the stored list, re-reads the account and overwrites its
    /// cache entry with the result.
    #[instrument(skip(self), fields(kind = mutation.kind()))]
    async fn update_hobbies(
        &self,
        username: &str,
        mutation: HobbyMutation,
    ) -> Result<Vec<String>, AccountError> {
        let touched = self.storage.mutate_hobbies(username, &mutation).await?;

        let account = self
            .storage
            .find(username)
            .await?
            .ok_or_else(|| AccountError::not_found(username))?;

        self.write_snapshot(&cache_key(username), &account).await?;
        tracing::debug!(touched, hobbies = account.hobbies.len(), "hobbies updated");
        Ok(account.hobbies)
    }

    async fn cached_snapshot(&self, key: &str) -> Result<Option<UserSnapshot>, AccountError> {
        let Some(data) = self.cache.get(key).await? else {
            return Ok(None);
        };
        match UserSnapshot::from_bytes(&data) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "undecodable cache entry, treating as miss");
                Ok(None)
            }
        }
    }

    async fn write_snapshot(&self, key: &str, account: &Account) -> Result<(), AccountError> {
        let data = UserSnapshot::from_account(account)
            .to_bytes()
            .map_err(|e| AccountError::operation_failed(format!("encode cache entry: {e}")))?;
        self.cache.set(key, data, self.settings.user_ttl).await?;
        Ok(())
    }
}
