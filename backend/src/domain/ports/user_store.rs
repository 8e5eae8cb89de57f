//! Driven port for the user collection's backing store.
//!
//! The collection is loaded in full and written back in full; there is no
//! partial update. Loading never fails: an unreadable store yields a
//! degraded [`LoadedUsers`] holding whatever could be recovered, so read
//! paths stay available while writes refuse to replace the document.

use async_trait::async_trait;

use crate::domain::UserRecord;

/// Persistence errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// The configured location cannot name a file.
    #[error("user store path is invalid: {path}")]
    InvalidPath {
        /// Offending location as configured.
        path: String,
    },
    /// The collection could not be encoded.
    #[error("failed to serialise user collection: {message}")]
    Serialize {
        /// Encoder failure description.
        message: String,
    },
    /// The encoded collection could not be written.
    #[error("failed to write user collection to {path}: {message}")]
    Write {
        /// Location being written.
        path: String,
        /// I/O failure description.
        message: String,
    },
}

impl UserStoreError {
    /// Build a [`UserStoreError::Write`] from any displayable cause.
    pub fn write(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result of loading the collection.
///
/// A store with no document yet loads as an empty, complete collection.
/// `degraded` is set when a document exists but could not be read in full:
/// it was unreadable, not a JSON array, or held entries that are not user
/// records. A degraded load carries only the records that decoded, so saving
/// it back would drop data; writers must refuse instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedUsers {
    users: Vec<UserRecord>,
    degraded: bool,
}

impl LoadedUsers {
    /// A successful load.
    #[must_use]
    pub fn from_users(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            degraded: false,
        }
    }

    /// A fail-soft load standing in for an unreadable store.
    #[must_use]
    pub fn degraded() -> Self {
        Self::partial(Vec::new())
    }

    /// A fail-soft load that recovered some, but not all, stored entries.
    #[must_use]
    pub fn partial(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            degraded: true,
        }
    }

    /// Whether the store could not be read.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Records in insertion order.
    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// Take ownership of the records.
    #[must_use]
    pub fn into_users(self) -> Vec<UserRecord> {
        self.users
    }
}

/// Backing store holding the whole user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Read the full collection, degrading when the document cannot be read
    /// in full.
    async fn load(&self) -> LoadedUsers;

    /// Replace the stored collection with `users`.
    async fn save(&self, users: &[UserRecord]) -> Result<(), UserStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn degraded_load_is_empty() {
        let loaded = LoadedUsers::degraded();
        assert!(loaded.is_degraded());
        assert!(loaded.users().is_empty());
    }

    #[rstest]
    fn partial_load_keeps_recovered_users() {
        let loaded = LoadedUsers::partial(vec![UserRecord::new(1, "ab", "ab@x.com")]);
        assert!(loaded.is_degraded());
        assert_eq!(loaded.users().len(), 1);
    }

    #[rstest]
    fn empty_collection_is_not_degraded() {
        let loaded = LoadedUsers::from_users(Vec::new());
        assert!(!loaded.is_degraded());
        assert_eq!(loaded, LoadedUsers::default());
    }

    #[rstest]
    fn write_error_mentions_path() {
        let err = UserStoreError::write("data/users.json", "disk full");
        assert_eq!(
            err.to_string(),
            "failed to write user collection to data/users.json: disk full"
        );
    }
}
