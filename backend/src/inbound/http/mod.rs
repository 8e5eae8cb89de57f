//! HTTP inbound adapter exposing the user registry endpoints.
//!
//! ```text
//! GET  /read/usernames
//! GET  /read/username/{name}
//! POST /write/adduser
//! ```

pub mod error;
pub mod health;
pub mod read;
pub mod schemas;
pub mod state;
pub mod write;

pub use error::{ApiResult, ErrorBody};
