//! Sign-in and sign-out handlers.
//!
//! ```text
//! POST /login?callbackUrl=/dashboard/invoices   email=..&password=..[&redirectTo=..]
//! POST /logout
//! ```
//!
//! Successful sign-in stores the user id in the session cookie and answers
//! `303 See Other` to the resolved callback. Refusals answer `401` with the
//! refusal message as a form state.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use zeroize::Zeroizing;

use crate::domain::{
    CredentialsForm, FormState, LOGIN_PATH, Redirect, SignInOutcome, resolve_callback_url,
    sign_in,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::action_response::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sign-in form body.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    #[schema(format = Password)]
    pub password: Option<String>,
    /// Page to land on after signing in; overrides `callbackUrl`.
    pub redirect_to: Option<String>,
}

/// Query parameters accepted by `POST /login`.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    /// Page the gate bounced the user from.
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// Verify credentials and start a session.
#[utoipa::path(
    post,
    path = "/login",
    params(LoginQuery),
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (
            status = 303,
            description = "Signed in; redirect to the callback",
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 401, description = "Credentials refused", body = FormState),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LoginQuery>,
    form: web::Form<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest {
        email,
        password,
        redirect_to,
    } = form.into_inner();
    let credentials = CredentialsForm {
        email,
        password: password.map(Zeroizing::new),
    };

    match sign_in(state.credentials.as_ref(), &credentials).await? {
        SignInOutcome::Authenticated(user_id) => {
            session.persist_user(&user_id)?;
            let callback = redirect_to.or_else(|| query.into_inner().callback_url);
            let target = resolve_callback_url(callback.as_deref(), &state.base_url);
            Ok(see_other(&Redirect::to(target)))
        }
        SignInOutcome::Refused(message) => {
            Ok(HttpResponse::Unauthorized().json(FormState::with_message(message)))
        }
    }
}

/// End the session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Signed out; redirect to /login")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other(&Redirect::to(LOGIN_PATH))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
