//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the read, write, and health endpoints together with
//! the response schemas they use. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::ErrorBody;
use crate::inbound::http::read::EmailResponse;
use crate::inbound::http::schemas::UserSummarySchema;
use crate::inbound::http::write::{AddUserRequest, MessageResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "List usernames, look up emails, and add users stored in a JSON file."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::read::list_usernames,
        crate::inbound::http::read::find_email,
        crate::inbound::http::write::add_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSummarySchema,
        EmailResponse,
        AddUserRequest,
        MessageResponse,
        ErrorBody
    )),
    tags(
        (name = "read", description = "Read-only user lookups"),
        (name = "write", description = "Append-only user registration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
