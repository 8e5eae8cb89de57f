//! Cross-origin policy admitting a single browser origin.
//!
//! Requests whose `Origin` header equals the configured origin get an
//! `Access-Control-Allow-Origin` header on the response. Preflight `OPTIONS`
//! requests from that origin are answered directly with `204 No Content`.
//! Requests from any other origin pass through without CORS headers, leaving
//! the browser to block them.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_METHOD, HeaderValue, InvalidHeaderValue, ORIGIN, VARY,
};
use actix_web::HttpResponse;
use futures_util::future::{LocalBoxFuture, Ready, ready};

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

/// Middleware admitting one origin.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::AllowOrigin;
///
/// let cors = AllowOrigin::new("http://localhost:3000").expect("valid origin");
/// let _app = App::new().wrap(cors);
/// ```
#[derive(Clone, Debug)]
pub struct AllowOrigin {
    origin: HeaderValue,
}

impl AllowOrigin {
    /// Admit `origin`, which must be a valid header value.
    pub fn new(origin: &str) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            origin: HeaderValue::from_str(origin)?,
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for AllowOrigin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AllowOriginMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AllowOriginMiddleware {
            service,
            origin: self.origin.clone(),
        }))
    }
}

/// Service wrapper produced by [`AllowOrigin`].
pub struct AllowOriginMiddleware<S> {
    service: S,
    origin: HeaderValue,
}

impl<S> AllowOriginMiddleware<S> {
    fn preflight_response(&self) -> HttpResponse {
        HttpResponse::NoContent()
            .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, self.origin.clone()))
            .insert_header((ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
            .insert_header((ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
            .insert_header((VARY, "Origin"))
            .finish()
    }
}

impl<S, B> Service<ServiceRequest> for AllowOriginMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let allowed = req.headers().get(ORIGIN) == Some(&self.origin);
        let preflight = req.method() == Method::OPTIONS
            && req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD);

        if allowed && preflight {
            let res = req
                .into_response(self.preflight_response())
                .map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        let origin = allowed.then(|| self.origin.clone());
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if let Some(origin) = origin {
                let headers = res.headers_mut();
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                headers.append(VARY, HeaderValue::from_static("Origin"));
            }
            Ok(res.map_into_left_body())
        })
    }
}
