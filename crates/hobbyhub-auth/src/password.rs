//! Password hashing and verification.
//!
//! New hashes are produced with the configured [`PasswordScheme`]. Stored
//! hashes are verified with whichever scheme produced them:
//!
//! - `$argon2...` PHC strings are verified with Argon2
//! - everything else is treated as a bcrypt hash (`$2a$`, `$2b$`, `$2y$`)
//!
//! # Security
//!
//! - Every hash carries its own random salt (bcrypt salt / `OsRng` for Argon2)
//! - Comparison is constant-time in both backends
//! - Hashing is CPU-bound and runs on tokio's blocking pool
//!
//! # Example
//!
//! ```
//! use hobbyhub_auth::password::{hash_password, verify_password};
//! use hobbyhub_auth::PasswordConfig;
//!
//! let config = PasswordConfig { bcrypt_cost: 4, ..Default::default() };
//! let hash = hash_password(&config, "pw1").unwrap();
//! assert!(verify_password("pw1", &hash).unwrap());
//! assert!(!verify_password("pw2", &hash).unwrap());
//! ```

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::config::{PasswordConfig, PasswordScheme};
use crate::error::PasswordError;

/// Hash a password for storage using the configured scheme.
///
/// # Errors
///
/// Returns `PasswordError::Hashing` if the backend rejects the input.
pub fn hash_password(config: &PasswordConfig, password: &str) -> Result<String, PasswordError> {
    match config.scheme {
        PasswordScheme::Bcrypt => bcrypt::hash(password, config.bcrypt_cost)
            .map_err(|e| PasswordError::hashing(e.to_string())),
        PasswordScheme::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| PasswordError::hashing(e.to_string()))
        }
    }
}

/// Verify a password against a stored hash.
///
/// # Returns
///
/// `Ok(true)` if the password matches, `Ok(false)` if it doesn't.
///
/// # Errors
///
/// Returns `PasswordError::MalformedHash` only if the stored hash cannot be
/// parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    match detect_scheme(hash) {
        PasswordScheme::Argon2 => {
            let parsed = PasswordHash::new(hash)
                .map_err(|e| PasswordError::malformed_hash(e.to_string()))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        }
        PasswordScheme::Bcrypt => {
            bcrypt::verify(password, hash).map_err(|e| PasswordError::malformed_hash(e.to_string()))
        }
    }
}

/// Detects which scheme produced a stored hash.
pub fn detect_scheme(hash: &str) -> PasswordScheme {
    if hash.starts_with("$argon2") {
        PasswordScheme::Argon2
    } else {
        PasswordScheme::Bcrypt
    }
}

/// Async password hashing service.
///
/// Wraps [`hash_password`] and [`verify_password`] in
/// `tokio::task::spawn_blocking` so request tasks never stall the runtime
/// while the work factor is being paid.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    config: PasswordConfig,
}

impl PasswordHasher {
    /// Creates a hasher with the given configuration.
    #[must_use]
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &PasswordConfig {
        &self.config
    }

    /// Hashes `password` with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the blocking task is lost.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let config = self.config.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_password(&config, &password)).await?
    }

    /// Compares `password` with `hash`.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed or the blocking task is lost.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matched =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
        tracing::trace!(matched, "password verified");
        Ok(matched)
    }
}
