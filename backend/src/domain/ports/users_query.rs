//! Driving port for read-only user lookups.

use async_trait::async_trait;

use crate::domain::{Error, UserSummary};

/// Domain use-case port for reading the user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user's `{id, username}` in stored order.
    ///
    /// An empty collection is reported as [`crate::domain::ErrorCode::NotFound`].
    async fn list_usernames(&self) -> Result<Vec<UserSummary>, Error>;

    /// Email of the first user whose username matches exactly.
    async fn find_email(&self, username: &str) -> Result<String, Error>;
}
