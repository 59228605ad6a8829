//! Authorization gate middleware.
//!
//! Runs before every route handler. The principal is read from the session
//! and handed to [`authorize`]; refusals become `303 See Other` redirects so
//! browsers land on the sign-in page (or the dashboard) without a handler
//! ever running. Must be wrapped inside the session middleware.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{AccessDecision, authorize, sign_in_redirect};

use super::action_response::see_other;
use super::session::SessionContext;

/// Middleware enforcing the per-request access rules.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use dashboard::inbound::http::authorization::AuthorizationGate;
///
/// let app = App::new().wrap(AuthorizationGate);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorizationGate;

impl<S, B> Transform<S, ServiceRequest> for AuthorizationGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthorizationGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationGateMiddleware { service }))
    }
}

/// Service wrapper produced by [`AuthorizationGate`].
pub struct AuthorizationGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthorizationGateMiddleware<S>
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
        let principal = SessionContext::new(req.get_session()).principal();
        // The router matches on the percent-decoded path; classify that one.
        let path = req.match_info().as_str().to_owned();
        let target = match authorize(&principal, &path) {
            AccessDecision::Allow => {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
            }
            AccessDecision::Deny => {
                let requested = req
                    .uri()
                    .path_and_query()
                    .map_or_else(|| req.path().to_owned(), ToString::to_string);
                sign_in_redirect(&requested)
            }
            AccessDecision::Redirect(target) => target,
        };
        debug!(path = %path, location = %target.location(), "request redirected by gate");
        let response = see_other(&target);
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}
