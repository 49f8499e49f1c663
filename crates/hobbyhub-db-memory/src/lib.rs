//! In-memory account storage backend for the HobbyHub server.
//!
//! This crate provides an in-memory implementation of the `AccountStorage`
//! trait from `hobbyhub-storage`, using a `DashMap` for concurrent access.
//! It backs the test suites and single-process demo deployments.
//!
//! # Example
//!
//! ```ignore
//! use hobbyhub_db_memory::InMemoryAccountStorage;
//! use hobbyhub_storage::{AccountStorage, NewAccount};
//!
//! let storage = InMemoryAccountStorage::new();
//! storage.create(&NewAccount::new("alice", hash)).await?;
//! ```

pub mod storage;

pub use hobbyhub_storage::{AccountStorage, StorageError};
pub use storage::{InMemoryAccountStorage, OperationCounts};

/// Creates a new shareable in-memory `AccountStorage` instance.
pub fn create_account_storage() -> hobbyhub_storage::DynAccountStorage {
    std::sync::Arc::new(InMemoryAccountStorage::new())
}
