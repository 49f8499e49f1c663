//! # hobbyhub-storage
//!
//! Storage abstraction layer for the HobbyHub server.
//!
//! This crate defines the traits and types that every credential store must
//! implement. It does not contain any implementations - those live in
//! `hobbyhub-db-postgres` and `hobbyhub-db-memory`.
//!
//! ## Overview
//!
//! The main trait is [`AccountStorage`], which defines the contract for:
//! - looking up an account by username
//! - creating an account with an empty hobby list
//! - mutating the ordered hobby list in place
//!
//! ## Example
//!
//! ```ignore
//! use hobbyhub_storage::{AccountStorage, HobbyMutation, StorageError};
//!
//! async fn add_chess(storage: &dyn AccountStorage) -> Result<Option<Vec<String>>, StorageError> {
//!     storage
//!         .mutate_hobbies("alice", &HobbyMutation::add("chess"))
//!         .await?;
//!     let account = storage.find("alice").await?;
//!     Ok(account.map(|a| a.hobbies))
//! }
//! ```

mod error;
mod traits;
mod types;

pub use error::StorageError;
pub use traits::AccountStorage;
pub use types::{Account, HobbyMutation, NewAccount};

/// Type alias for a shareable account storage instance.
pub type DynAccountStorage = std::sync::Arc<dyn AccountStorage>;
