//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their JSON shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::UserSummary`].
#[derive(ToSchema)]
#[schema(as = UserSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSummarySchema {
    /// Caller-supplied identifier; omitted for records stored without one.
    #[schema(example = 1)]
    id: Option<i64>,
    /// Unique login handle.
    #[schema(example = "ab")]
    username: String,
}
