//! Outbound adapters implementing domain ports.
//!
//! - [`json_file`]: the production [`crate::domain::ports::UserStore`] backed
//!   by a pretty-printed JSON document on disk.
//! - [`in_memory`]: a process-local store for tests and local experiments.
//!
//! Adapters translate between domain types and storage representations and
//! carry no business rules.

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryUserStore;
pub use json_file::JsonFileUserStore;
