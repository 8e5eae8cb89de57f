//! Append-only user registration.
//!
//! The load, duplicate check, append, and save run under a single-writer lock
//! so two overlapping adds served by this process cannot overwrite each
//! other's record. Writers in other processes are not coordinated.
//!
//! A degraded load means the stored document could not be read in full.
//! Saving the recovered subset would drop the unreadable entries, so such an
//! add fails with the save error and leaves the document untouched.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::domain::ports::{UserRegistration, UserStore};
use crate::domain::{Error, NewUser, UserRecord, UserValidationError};

/// Message reported when required fields are missing.
pub const INVALID_USER_DATA_MESSAGE: &str = "Invalid user data. Required: id, username, email";
/// Message reported when the username is already taken.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "Username already exists";
/// Message reported when the collection could not be persisted.
pub const SAVE_FAILED_MESSAGE: &str = "Error saving user";

/// Registration service implementing [`UserRegistration`] on top of a
/// [`UserStore`].
pub struct UserRegistrationService<S: ?Sized> {
    write_lock: Mutex<()>,
    store: Arc<S>,
}

impl<S: ?Sized> UserRegistrationService<S> {
    /// Create a service appending to `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            write_lock: Mutex::new(()),
            store,
        }
    }

    fn map_validation_error(err: &UserValidationError) -> Error {
        debug!(error = %err, "rejected user candidate");
        Error::invalid_request(INVALID_USER_DATA_MESSAGE)
    }
}

#[async_trait]
impl<S> UserRegistration for UserRegistrationService<S>
where
    S: UserStore + ?Sized,
{
    async fn add_user(&self, candidate: NewUser) -> Result<UserRecord, Error> {
        let record = candidate
            .validate()
            .map_err(|err| Self::map_validation_error(&err))?;

        let _guard = self.write_lock.lock().await;
        let loaded = self.store.load().await;
        if loaded
            .users()
            .iter()
            .any(|user| user.username() == record.username())
        {
            return Err(Error::invalid_request(DUPLICATE_USERNAME_MESSAGE));
        }
        if loaded.is_degraded() {
            error!(
                username = record.username(),
                "user store could not be read in full; refusing to overwrite it"
            );
            return Err(Error::internal(SAVE_FAILED_MESSAGE));
        }

        let mut users = loaded.into_users();
        users.push(record.clone());
        if let Err(err) = self.store.save(&users).await {
            error!(error = %err, username = record.username(), "failed to persist user");
            return Err(Error::internal(SAVE_FAILED_MESSAGE));
        }

        info!(id = ?record.id(), username = record.username(), "user added");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{LoadedUsers, MockUserStore, UserStoreError};
    use crate::outbound::{InMemoryUserStore, JsonFileUserStore};
    use rstest::{fixture, rstest};

    #[fixture]
    fn existing() -> Vec<UserRecord> {
        vec![UserRecord::new(1, "ab", "ab@x.com").with_names("A", "B")]
    }

    fn candidate(id: i64, username: &str, email: &str) -> NewUser {
        NewUser {
            id: Some(id),
            username: Some(username.to_owned()),
            email: Some(email.to_owned()),
            ..NewUser::default()
        }
    }

    fn store_with(users: Vec<UserRecord>) -> MockUserStore {
        let mut store = MockUserStore::new();
        store
            .expect_load()
            .returning(move || LoadedUsers::from_users(users.clone()));
        store
    }

    #[rstest]
    #[tokio::test]
    async fn add_user_appends_and_saves(existing: Vec<UserRecord>) {
        let mut store = store_with(existing);
        store
            .expect_save()
            .withf(|users: &[UserRecord]| {
                users.len() == 2
                    && users[0].username() == "ab"
                    && users[1] == UserRecord::new(3, "cd", "c@d.com")
            })
            .times(1)
            .returning(|_| Ok(()));
        let service = UserRegistrationService::new(Arc::new(store));

        let record = service
            .add_user(candidate(3, "cd", "c@d.com"))
            .await
            .expect("user added");
        assert_eq!(record.email(), "c@d.com");
    }

    #[rstest]
    #[tokio::test]
    async fn add_user_rejects_duplicate_without_saving(existing: Vec<UserRecord>) {
        let mut store = store_with(existing);
        store.expect_save().never();
        let service = UserRegistrationService::new(Arc::new(store));

        let err = service
            .add_user(candidate(2, "ab", "c@d.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), DUPLICATE_USERNAME_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn add_user_treats_usernames_case_sensitively(existing: Vec<UserRecord>) {
        let mut store = store_with(existing);
        store.expect_save().times(1).returning(|_| Ok(()));
        let service = UserRegistrationService::new(Arc::new(store));

        service
            .add_user(candidate(2, "AB", "c@d.com"))
            .await
            .expect("distinct username");
    }

    #[rstest]
    #[tokio::test]
    async fn add_user_rejects_invalid_candidate_before_loading() {
        let mut store = MockUserStore::new();
        store.expect_load().never();
        store.expect_save().never();
        let service = UserRegistrationService::new(Arc::new(store));

        let err = service
            .add_user(NewUser {
                email: None,
                ..candidate(4, "ef", "unused")
            })
            .await
            .expect_err("invalid candidate");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), INVALID_USER_DATA_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn add_user_reports_persistence_failure(existing: Vec<UserRecord>) {
        let mut store = store_with(existing);
        store
            .expect_save()
            .returning(|_| Err(UserStoreError::write("users.json", "read-only file system")));
        let service = UserRegistrationService::new(Arc::new(store));

        let err = service
            .add_user(candidate(3, "cd", "c@d.com"))
            .await
            .expect_err("save failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), SAVE_FAILED_MESSAGE);
    }

    #[rstest]
    #[case::unreadable(LoadedUsers::degraded())]
    #[case::partially_decoded(LoadedUsers::partial(vec![UserRecord::new(1, "ab", "ab@x.com")]))]
    #[tokio::test]
    async fn add_user_refuses_to_overwrite_degraded_store(#[case] loaded: LoadedUsers) {
        let mut store = MockUserStore::new();
        store.expect_load().returning(move || loaded.clone());
        store.expect_save().never();
        let service = UserRegistrationService::new(Arc::new(store));

        let err = service
            .add_user(candidate(3, "cd", "c@d.com"))
            .await
            .expect_err("degraded store");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), SAVE_FAILED_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn add_user_reports_duplicate_from_recovered_records() {
        let mut store = MockUserStore::new();
        store
            .expect_load()
            .returning(|| LoadedUsers::partial(vec![UserRecord::new(1, "ab", "ab@x.com")]));
        store.expect_save().never();
        let service = UserRegistrationService::new(Arc::new(store));

        let err = service
            .add_user(candidate(2, "ab", "other@x.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.message(), DUPLICATE_USERNAME_MESSAGE);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn overlapping_adds_all_persist() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileUserStore::new(dir.path().join("users.json")).expect("store path");
        let service = Arc::new(UserRegistrationService::new(Arc::new(store.clone())));

        let adds: Vec<_> = (1..=8)
            .map(|id| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .add_user(candidate(id, &format!("user{id}"), "u@x.com"))
                        .await
                })
            })
            .collect();
        for add in adds {
            add.await.expect("add task").expect("user added");
        }

        let loaded = store.load().await;
        assert!(!loaded.is_degraded());
        let mut ids: Vec<_> = loaded.users().iter().filter_map(UserRecord::id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[rstest]
    #[tokio::test]
    async fn joined_adds_over_memory_store_both_persist() {
        let store = Arc::new(InMemoryUserStore::default());
        let service = UserRegistrationService::new(Arc::clone(&store));

        let (first, second) = tokio::join!(
            service.add_user(candidate(1, "ab", "ab@x.com")),
            service.add_user(candidate(2, "cd", "c@d.com")),
        );
        first.expect("first add");
        second.expect("second add");

        let usernames: Vec<_> = store
            .snapshot()
            .iter()
            .map(|user| user.username().to_owned())
            .collect();
        assert_eq!(usernames, vec!["ab", "cd"]);
    }
}
