//! Process-local user store.
//!
//! Holds the collection in memory behind a mutex. It can be told to report
//! an unreadable store or to fail every write, which lets adapter tests reach
//! the degraded and persistence-failure paths without touching the disk.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::UserRecord;
use crate::domain::ports::{LoadedUsers, UserStore, UserStoreError};

const MEMORY_PATH: &str = "<memory>";

#[derive(Debug, Default)]
struct State {
    users: Vec<UserRecord>,
    unreadable: bool,
    failing_writes: bool,
}

/// In-memory [`UserStore`].
///
/// # Examples
/// ```
/// use backend::domain::UserRecord;
/// use backend::outbound::InMemoryUserStore;
///
/// let store = InMemoryUserStore::new(vec![UserRecord::new(1, "ab", "ab@x.com")]);
/// assert_eq!(store.snapshot().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    state: Mutex<State>,
}

impl InMemoryUserStore {
    /// Seed the store with `users`.
    #[must_use]
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            state: Mutex::new(State {
                users,
                ..State::default()
            }),
        }
    }

    /// A store whose loads always degrade.
    #[must_use]
    pub fn unreadable() -> Self {
        Self {
            state: Mutex::new(State {
                unreadable: true,
                ..State::default()
            }),
        }
    }

    /// Make every subsequent save fail.
    #[must_use]
    pub fn with_failing_writes(self) -> Self {
        self.lock().failing_writes = true;
        self
    }

    /// Copy of the stored records.
    #[must_use]
    pub fn snapshot(&self) -> Vec<UserRecord> {
        self.lock().users.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn load(&self) -> LoadedUsers {
        let state = self.lock();
        if state.unreadable {
            LoadedUsers::degraded()
        } else {
            LoadedUsers::from_users(state.users.clone())
        }
    }

    async fn save(&self, users: &[UserRecord]) -> Result<(), UserStoreError> {
        let mut state = self.lock();
        if state.failing_writes {
            return Err(UserStoreError::write(MEMORY_PATH, "writes disabled"));
        }
        state.users = users.to_vec();
        state.unreadable = false;
        Ok(())
    }
}
