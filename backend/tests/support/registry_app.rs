//! Shared app assembly for user registry integration tests.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{read, write};
use backend::test_support::users_file::UsersFile;
use backend::{AllowOrigin, Trace};

pub(crate) const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Assemble the registry routes over `file` with the production middleware.
pub(crate) fn registry_app(
    file: &UsersFile,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let store = file.store().expect("users store");
    App::new()
        .app_data(web::Data::new(HttpState::for_store(Arc::new(store))))
        .wrap(AllowOrigin::new(ALLOWED_ORIGIN).expect("valid origin"))
        .wrap(Trace)
        .service(read::scope())
        .service(write::scope())
}
