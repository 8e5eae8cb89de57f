//! Read-only user lookups over a freshly loaded collection.
//!
//! Every call reloads the store, so there is no cache to invalidate and no
//! state shared between requests.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{UserStore, UsersQuery};
use crate::domain::{Error, UserRecord, UserSummary};

/// Message reported when the collection holds no users.
pub const NO_USERS_MESSAGE: &str = "No users found";
/// Message reported when no username matches.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Project every record onto `{id, username}`, preserving order.
#[must_use]
pub fn project_usernames(users: &[UserRecord]) -> Vec<UserSummary> {
    users.iter().map(UserRecord::summary).collect()
}

/// Email of the first record whose username equals `username` exactly.
#[must_use]
pub fn email_for<'a>(users: &'a [UserRecord], username: &str) -> Option<&'a str> {
    users
        .iter()
        .find(|user| user.username() == username)
        .map(UserRecord::email)
}

/// Query service implementing [`UsersQuery`] on top of a [`UserStore`].
pub struct UsersQueryService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> UsersQueryService<S> {
    /// Create a service reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> UsersQuery for UsersQueryService<S>
where
    S: UserStore + ?Sized,
{
    async fn list_usernames(&self) -> Result<Vec<UserSummary>, Error> {
        let loaded = self.store.load().await;
        if loaded.is_degraded() {
            warn!(
                recovered = loaded.users().len(),
                "user store could not be read in full; listing recovered users"
            );
        }
        let summaries = project_usernames(loaded.users());
        if summaries.is_empty() {
            return Err(Error::not_found(NO_USERS_MESSAGE));
        }
        Ok(summaries)
    }

    async fn find_email(&self, username: &str) -> Result<String, Error> {
        let loaded = self.store.load().await;
        email_for(loaded.users(), username)
            .map(str::to_owned)
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}
