//! # hobbyhub-auth
//!
//! Credential verification for the HobbyHub server.
//!
//! This crate provides:
//! - one-way, salted password hashing with a tunable work factor
//! - constant-time comparison of a plaintext against a stored hash
//! - configuration for the hashing scheme
//!
//! ## Modules
//!
//! - [`config`] - Password hashing configuration
//! - [`error`] - Error types for hashing and verification
//! - [`password`] - The [`PasswordHasher`] service
//!
//! ## Example
//!
//! ```ignore
//! use hobbyhub_auth::{PasswordConfig, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(PasswordConfig::default());
//! let hash = hasher.hash("pw1").await?;
//! assert!(hasher.verify("pw1", &hash).await?);
//! ```

pub mod config;
pub mod error;
pub mod password;

pub use config::{ConfigError, PasswordConfig, PasswordScheme};
pub use error::PasswordError;
pub use password::PasswordHasher;
