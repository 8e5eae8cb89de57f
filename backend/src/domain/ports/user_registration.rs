//! Driving port for adding users.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, UserRecord};

/// Domain use-case port for the append-only write surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Validate `candidate`, reject duplicate usernames, append, and persist.
    ///
    /// Returns the stored record.
    async fn add_user(&self, candidate: NewUser) -> Result<UserRecord, Error>;
}
