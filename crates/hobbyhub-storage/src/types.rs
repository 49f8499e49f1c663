//! Storage types for the account storage abstraction layer.

use std::fmt;

/// An account as stored in the credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique username, immutable after creation.
    pub username: String,
    /// One-way salted hash of the password.
    pub password_hash: String,
    /// Ordered hobby labels. Duplicates are allowed.
    pub hobbies: Vec<String>,
}

impl Account {
    /// Creates a new `Account` with an empty hobby list.
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            hobbies: Vec::new(),
        }
    }

    /// Sets the hobby list.
    #[must_use]
    pub fn with_hobbies<I, S>(mut self, hobbies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hobbies = hobbies.into_iter().map(Into::into).collect();
        self
    }
}

// The hash never shows up in logs.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("hobbies", &self.hobbies)
            .finish()
    }
}

/// Input for creating an account.
#[derive(Clone)]
pub struct NewAccount {
    /// Requested username.
    pub username: String,
    /// Already hashed password.
    pub password_hash: String,
}

impl NewAccount {
    /// Creates a new `NewAccount`.
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// A change to an account's hobby list.
///
/// Matching is by exact string value and applies to every matching element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HobbyMutation {
    /// Append a label to the end of the list.
    Add(String),
    /// Remove every element equal to the label.
    Remove(String),
    /// Replace every element equal to `from` with `to`, keeping positions.
    Rename {
        /// Label to look for.
        from: String,
        /// Replacement label.
        to: String,
    },
}

impl HobbyMutation {
    /// Creates an `Add` mutation.
    #[must_use]
    pub fn add(label: impl Into<String>) -> Self {
        Self::Add(label.into())
    }

    /// Creates a `Remove` mutation.
    #[must_use]
    pub fn remove(label: impl Into<String>) -> Self {
        Self::Remove(label.into())
    }

    /// Creates a `Rename` mutation.
    #[must_use]
    pub fn rename(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Rename {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Applies the mutation to a list in place.
    ///
    /// Mirrors PostgreSQL's `array_append`, `array_remove` and
    /// `array_replace` so that every backend agrees on the result.
    pub fn apply(&self, hobbies: &mut Vec<String>) {
        match self {
            Self::Add(label) => hobbies.push(label.clone()),
            Self::Remove(label) => hobbies.retain(|h| h != label),
            Self::Rename { from, to } => {
                for hobby in hobbies.iter_mut() {
                    if hobby.as_str() == from.as_str() {
                        hobby.clone_from(to);
                    }
                }
            }
        }
    }

    /// Short operation name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Rename { .. } => "rename",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_appends_even_when_present() {
        let mut hobbies = list(&["chess"]);
        HobbyMutation::add("chess").apply(&mut hobbies);
        assert_eq!(hobbies, list(&["chess", "chess"]));
    }

    #[test]
    fn remove_drops_every_match() {
        let mut hobbies = list(&["run", "chess", "art", "chess"]);
        HobbyMutation::remove("chess").apply(&mut hobbies);
        assert_eq!(hobbies, list(&["run", "art"]));
    }

    #[test]
    fn remove_missing_label_is_noop() {
        let mut hobbies = list(&["run", "art"]);
        HobbyMutation::remove("chess").apply(&mut hobbies);
        assert_eq!(hobbies, list(&["run", "art"]));
    }

    #[test]
    fn rename_keeps_length_and_position() {
        let mut hobbies = list(&["run", "chess", "art"]);
        HobbyMutation::rename("chess", "go").apply(&mut hobbies);
        assert_eq!(hobbies, list(&["run", "go", "art"]));
    }

    #[test]
    fn add_then_remove_restores_list() {
        let mut hobbies = list(&["run", "art"]);
        HobbyMutation::add("chess").apply(&mut hobbies);
        HobbyMutation::remove("chess").apply(&mut hobbies);
        assert_eq!(hobbies, list(&["run", "art"]));
    }

    #[test]
    fn debug_redacts_hash() {
        let account = Account::new("alice", "$2b$10$secret");
        let rendered = format!("{account:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret"));

        let new_account = NewAccount::new("alice", "$2b$10$secret");
        assert!(!format!("{new_account:?}").contains("secret"));
    }
}
