//! Domain primitives, ports, and services.
//!
//! Purpose: keep user-record rules and the read/append use-cases independent
//! of HTTP and of the file format. Inbound adapters depend on the driving
//! ports in [`ports`]; outbound adapters implement [`ports::UserStore`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`UserRecord`], [`NewUser`], [`UserSummary`]: stored, candidate, and
//!   listed user shapes.
//! - [`UsersQueryService`], [`UserRegistrationService`]: use-case services.
//! - [`TraceId`]: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_registration_service;
pub mod users_query_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, UserIdValue, UserRecord, UserSummary, UserValidationError};
pub use self::user_registration_service::UserRegistrationService;
pub use self::users_query_service::UsersQueryService;
