//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`UsersQuery`], [`UserRegistration`]) are what inbound
//! adapters call. The driven port ([`UserStore`]) is what outbound adapters
//! implement.

mod user_registration;
mod user_store;
mod users_query;

#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{LoadedUsers, UserStore, UserStoreError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
