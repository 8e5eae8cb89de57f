//! Write endpoint mounted under `/write`.
//!
//! ```text
//! POST /write/adduser {"id":3,"username":"cd","email":"c@d.com"}
//! ```

use actix_web::{Scope, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::user_registration_service::INVALID_USER_DATA_MESSAGE;
use crate::domain::{Error, NewUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned once a user has been stored.
pub const USER_ADDED_MESSAGE: &str = "User added successfully";

/// Request body for `POST /write/adduser`.
///
/// Every field is optional at the parsing stage so that missing fields are
/// reported by the domain rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    /// Caller-supplied identifier; required and non-zero.
    #[schema(example = 3)]
    pub id: Option<i64>,
    /// Optional given name.
    #[schema(example = "C")]
    pub first_name: Option<String>,
    /// Optional family name.
    #[schema(example = "D")]
    pub last_name: Option<String>,
    /// Requested username; required and unique.
    #[schema(example = "cd")]
    pub username: Option<String>,
    /// Contact address; required.
    #[schema(example = "c@d.com")]
    pub email: Option<String>,
}

impl From<AddUserRequest> for NewUser {
    fn from(value: AddUserRequest) -> Self {
        let AddUserRequest {
            id,
            first_name,
            last_name,
            username,
            email,
        } = value;
        Self {
            id,
            first_name,
            last_name,
            username,
            email,
        }
    }
}

/// Response body for a successful add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Confirmation text.
    #[schema(example = "User added successfully")]
    pub message: String,
}

/// Append a user and persist the collection.
#[utoipa::path(
    post,
    path = "/write/adduser",
    request_body = AddUserRequest,
    responses(
        (status = 200, description = "User added", body = MessageResponse),
        (status = 400, description = "Missing fields, malformed body, or duplicate username", body = crate::inbound::http::ErrorBody),
        (status = 500, description = "Error saving user", body = crate::inbound::http::ErrorBody)
    ),
    tags = ["write"],
    operation_id = "addUser"
)]
#[post("/adduser")]
pub async fn add_user(
    state: web::Data<HttpState>,
    payload: web::Json<AddUserRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .registration
        .add_user(NewUser::from(payload.into_inner()))
        .await?;
    Ok(web::Json(MessageResponse {
        message: USER_ADDED_MESSAGE.to_owned(),
    }))
}

/// JSON extractor settings reporting unparsable bodies as invalid user data.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected unparsable user payload");
        Error::invalid_request(INVALID_USER_DATA_MESSAGE).into()
    })
}

/// The `/write` scope with the add handler and its JSON settings.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::write;
///
/// let _app = App::new().service(write::scope());
/// ```
#[must_use]
pub fn scope() -> Scope {
    web::scope("/write")
        .app_data(json_config())
        .service(add_user)
}
