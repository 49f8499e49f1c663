//! Cached per-user snapshot stored under `user:<name>`.

use hobbyhub_storage::Account;
use serde::{Deserialize, Serialize};

/// Prefix of every per-user cache key.
pub const USER_KEY_PREFIX: &str = "user:";

/// Builds the cache key for `username`.
pub fn cache_key(username: &str) -> String {
    format!("{USER_KEY_PREFIX}{username}")
}

/// JSON document cached for a user.
///
/// Written as `{"name":..,"password":..,"hobbies":[..]}`. Entries written by
/// older deployments may lack `name`; `hobbies` defaults to empty.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Password hash, never a plaintext.
    pub password: String,
    #[serde(default)]
    pub hobbies: Vec<String>,
}

impl UserSnapshot {
    pub fn from_account(account: &Account) -> Self {
        Self {
            name: Some(account.username.clone()),
            password: account.password_hash.clone(),
            hobbies: account.hobbies.clone(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

impl std::fmt::Debug for UserSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSnapshot")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("hobbies", &self.hobbies)
            .finish()
    }
}
