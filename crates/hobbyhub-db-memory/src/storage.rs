use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use hobbyhub_storage::{Account, AccountStorage, HobbyMutation, NewAccount, StorageError};

/// In-memory account storage backend using `DashMap`.
///
/// This storage implementation provides:
/// - Sharded concurrent access via `DashMap`
/// - Atomic username uniqueness on create (entry API)
/// - Per-operation counters, so tests can assert which paths hit the store
#[derive(Debug, Default)]
pub struct InMemoryAccountStorage {
    accounts: DashMap<String, Account>,
    finds: AtomicU64,
    creates: AtomicU64,
    mutations: AtomicU64,
}

/// Snapshot of how many times each storage operation was invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationCounts {
    pub finds: u64,
    pub creates: u64,
    pub mutations: u64,
}

impl InMemoryAccountStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with the given accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let storage = Self::new();
        for account in accounts {
            storage.accounts.insert(account.username.clone(), account);
        }
        storage
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Returns the operation counters accumulated so far.
    pub fn operation_counts(&self) -> OperationCounts {
        OperationCounts {
            finds: self.finds.load(Ordering::Relaxed),
            creates: self.creates.load(Ordering::Relaxed),
            mutations: self.mutations.load(Ordering::Relaxed),
        }
    }

    /// Replaces the stored password hash of an account, bypassing the service.
    ///
    /// Used to simulate out-of-band credential changes. Returns `false` if the
    /// account does not exist.
    pub fn overwrite_password_hash(&self, username: &str, password_hash: &str) -> bool {
        match self.accounts.get_mut(username) {
            Some(mut account) => {
                account.password_hash = password_hash.to_string();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl AccountStorage for InMemoryAccountStorage {
    async fn find(&self, username: &str) -> Result<Option<Account>, StorageError> {
        self.finds.fetch_add(1, Ordering::Relaxed);
        Ok(self.accounts.get(username).map(|entry| entry.value().clone()))
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, StorageError> {
        self.creates.fetch_add(1, Ordering::Relaxed);
        match self.accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(StorageError::already_exists(&account.username)),
            Entry::Vacant(slot) => {
                let created = Account::new(&account.username, &account.password_hash);
                slot.insert(created.clone());
                tracing::debug!(username = %account.username, "account created (memory)");
                Ok(created)
            }
        }
    }

    async fn mutate_hobbies(
        &self,
        username: &str,
        mutation: &HobbyMutation,
    ) -> Result<u64, StorageError> {
        self.mutations.fetch_add(1, Ordering::Relaxed);
        match self.accounts.get_mut(username) {
            Some(mut account) => {
                mutation.apply(&mut account.hobbies);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
