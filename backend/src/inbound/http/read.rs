//! Read endpoints mounted under `/read`.
//!
//! ```text
//! GET /read/usernames        -> [{"id":1,"username":"ab"}]
//! GET /read/username/{name}  -> {"email":"ab@x.com"}
//! ```

use actix_web::{Scope, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserSummary;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Response body for `GET /read/username/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmailResponse {
    /// Email of the matching user.
    #[schema(example = "ab@x.com")]
    pub email: String,
}

/// List every user's id and username in stored order.
#[utoipa::path(
    get,
    path = "/read/usernames",
    responses(
        (status = 200, description = "Usernames", body = [crate::inbound::http::schemas::UserSummarySchema]),
        (status = 404, description = "No users found", body = crate::inbound::http::ErrorBody)
    ),
    tags = ["read"],
    operation_id = "listUsernames"
)]
#[get("/usernames")]
pub async fn list_usernames(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserSummary>>> {
    let summaries = state.users.list_usernames().await?;
    Ok(web::Json(summaries))
}

/// Look up a user's email by exact username.
#[utoipa::path(
    get,
    path = "/read/username/{name}",
    params(("name" = String, Path, description = "Username to look up; matched case-sensitively")),
    responses(
        (status = 200, description = "Email of the user", body = EmailResponse),
        (status = 404, description = "User not found", body = crate::inbound::http::ErrorBody)
    ),
    tags = ["read"],
    operation_id = "findEmailByUsername"
)]
#[get("/username/{name}")]
pub async fn find_email(
    state: web::Data<HttpState>,
    name: web::Path<String>,
) -> ApiResult<web::Json<EmailResponse>> {
    let email = state.users.find_email(&name).await?;
    Ok(web::Json(EmailResponse { email }))
}

/// The `/read` scope with both read handlers mounted.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::read;
///
/// let _app = App::new().service(read::scope());
/// ```
#[must_use]
pub fn scope() -> Scope {
    web::scope("/read").service(list_usernames).service(find_email)
}
