//! User registry backend library modules.
//!
//! A small HTTP service over a JSON file of user records: list usernames,
//! look up an email by username, and append new users.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{AllowOrigin, Trace};
