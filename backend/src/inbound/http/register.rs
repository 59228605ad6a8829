//! Account registration handler.
//!
//! ```text
//! POST /register   name=..&email=..&password=..&confirmPassword=..
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{FormState, RegistrationForm};
use crate::inbound::http::action_response::outcome_response;
use crate::inbound::http::state::HttpState;

/// Registration form body.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[schema(format = Password)]
    pub password: Option<String>,
    #[schema(format = Password)]
    pub confirm_password: Option<String>,
}

impl From<RegisterRequest> for RegistrationForm {
    fn from(value: RegisterRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password.map(Zeroizing::new),
            confirm_password: value.confirm_password.map(Zeroizing::new),
        }
    }
}

/// Create an account and send the user to sign in.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered; redirect to /login with a notice"),
        (status = 422, description = "Validation failed or email taken", body = FormState),
        (status = 500, description = "Storage failed", body = FormState)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<RegisterRequest>,
) -> HttpResponse {
    outcome_response(state.registration.register(form.into_inner().into()).await)
}
