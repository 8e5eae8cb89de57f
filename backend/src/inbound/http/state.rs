//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UserRegistration, UserStore, UsersQuery};
use crate::domain::{UserRegistrationService, UsersQueryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-only lookups.
    pub users: Arc<dyn UsersQuery>,
    /// Append-only writes.
    pub registration: Arc<dyn UserRegistration>,
}

impl HttpState {
    /// Construct state from explicit ports.
    pub fn new(users: Arc<dyn UsersQuery>, registration: Arc<dyn UserRegistration>) -> Self {
        Self {
            users,
            registration,
        }
    }

    /// Wire the domain services over a shared store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::InMemoryUserStore;
    ///
    /// let state = HttpState::for_store(Arc::new(InMemoryUserStore::default()));
    /// let _users = state.users.clone();
    /// ```
    pub fn for_store<S>(store: Arc<S>) -> Self
    where
        S: UserStore + ?Sized + 'static,
    {
        Self::new(
            Arc::new(UsersQueryService::new(Arc::clone(&store))),
            Arc::new(UserRegistrationService::new(store)),
        )
    }
}
