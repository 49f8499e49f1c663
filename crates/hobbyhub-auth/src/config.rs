//! Password hashing configuration.

use serde::{Deserialize, Serialize};

/// Lowest bcrypt cost accepted by the `bcrypt` crate.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest bcrypt cost accepted by the `bcrypt` crate.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Hashing scheme used for newly created password hashes.
///
/// Verification always detects the scheme from the stored hash, so switching
/// schemes does not invalidate existing accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// bcrypt (`$2b$...`), with a configurable cost.
    #[default]
    Bcrypt,
    /// Argon2id in PHC string format (`$argon2id$...`), default parameters.
    Argon2,
}

impl std::fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bcrypt => write!(f, "bcrypt"),
            Self::Argon2 => write!(f, "argon2"),
        }
    }
}

/// Password hashing configuration.
///
/// # Example (TOML)
///
/// ```toml
/// [password]
/// scheme = "bcrypt"
/// bcrypt_cost = 10
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Scheme for new hashes.
    pub scheme: PasswordScheme,

    /// bcrypt work factor (log2 of the number of rounds).
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            scheme: PasswordScheme::Bcrypt,
            bcrypt_cost: 10,
        }
    }
}

impl PasswordConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the bcrypt cost is outside the supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "password.bcrypt_cost".to_string(),
                message: format!(
                    "must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}, got {}",
                    self.bcrypt_cost
                ),
            });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A field holds an unsupported value.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
