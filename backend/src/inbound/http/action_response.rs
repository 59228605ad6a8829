//! Wire mapping for [`ActionOutcome`].
//!
//! - `Redirect` → `303 See Other` with the encoded `Location`.
//! - `Invalid` → `422 Unprocessable Entity` with the [`FormState`] body.
//! - `Failed` → `500 Internal Server Error` with the [`FormState`] body.
//! - `Done` → `204 No Content`.
//!
//! [`FormState`]: crate::domain::FormState

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, HttpResponseBuilder};

use crate::domain::{ActionOutcome, Redirect};

/// Build a `303 See Other` response for `target`.
pub fn see_other(target: &Redirect) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, target.location()))
        .finish()
}

/// Translate an action outcome into its HTTP response.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use dashboard::domain::{ActionOutcome, Redirect};
/// use dashboard::inbound::http::action_response::outcome_response;
///
/// let res = outcome_response(ActionOutcome::Redirect(Redirect::to("/dashboard/invoices")));
/// assert_eq!(res.status(), StatusCode::SEE_OTHER);
/// ```
pub fn outcome_response(outcome: ActionOutcome) -> HttpResponse {
    match outcome {
        ActionOutcome::Redirect(target) => see_other(&target),
        ActionOutcome::Invalid(state) => {
            HttpResponseBuilder::new(StatusCode::UNPROCESSABLE_ENTITY).json(state)
        }
        ActionOutcome::Failed(state) => HttpResponse::InternalServerError().json(state),
        ActionOutcome::Done => HttpResponse::NoContent().finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::FieldErrors;

    async fn json_body(res: HttpResponse) -> Value {
        let bytes = to_bytes(res.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    fn redirects_carry_the_encoded_location() {
        let res = outcome_response(ActionOutcome::Redirect(
            Redirect::to("/login").with_query("message", "Registration successful! Please log in."),
        ));

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).expect("location"),
            "/login?message=Registration+successful%21+Please+log+in."
        );
    }

    #[actix_web::test]
    async fn refusals_are_unprocessable_with_form_state() {
        let mut errors = FieldErrors::new();
        errors.push("status", "Please select an invoice status.");

        let res = outcome_response(ActionOutcome::invalid(
            errors,
            "Missing Fields. Failed to Create Invoice.",
        ));

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(res).await,
            json!({
                "errors": { "status": ["Please select an invoice status."] },
                "message": "Missing Fields. Failed to Create Invoice.",
            })
        );
    }

    #[actix_web::test]
    async fn storage_failures_are_server_errors() {
        let res = outcome_response(ActionOutcome::failed("Database Error: Failed to Delete Invoice."));

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(res).await,
            json!({ "message": "Database Error: Failed to Delete Invoice." })
        );
    }

    #[rstest]
    fn done_has_no_content() {
        assert_eq!(outcome_response(ActionOutcome::Done).status(), StatusCode::NO_CONTENT);
    }
}
