//! Handler tests for sign-in and sign-out.

use super::*;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{App, test};
use rstest::{fixture, rstest};
use serde_json::Value;

use crate::domain::ports::SignInError;
use crate::domain::{AuthErrorKind, Error, UserId};
use crate::inbound::http::test_utils::{TestPorts, session_cookie, test_session_middleware};

const USER: &str = "410544b2-4001-4271-9855-fec4b6a6442a";

#[fixture]
fn ports() -> TestPorts {
    TestPorts::default()
}

fn verifying(mut ports: TestPorts, result: Result<UserId, SignInError>) -> TestPorts {
    ports
        .credentials
        .expect_verify()
        .withf(|form: &CredentialsForm| {
            form.email.as_deref() == Some("user@nextmail.com")
                && form.password.as_deref().map(String::as_str) == Some("123456")
        })
        .times(1)
        .return_once(move |_| result);
    ports
}

macro_rules! auth_app {
    ($ports:expr) => {
        test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new($ports.into_state()))
                .service(login)
                .service(logout),
        )
        .await
    };
}

fn login_request(uri: &str, body: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
        .set_payload(body.to_owned())
}

const CREDENTIALS: &str = "email=user%40nextmail.com&password=123456";

#[rstest]
#[case("/login", CREDENTIALS, "http://localhost:3000/dashboard")]
#[case(
    "/login?callbackUrl=%2Fdashboard%2Finvoices",
    CREDENTIALS,
    "http://localhost:3000/dashboard/invoices"
)]
#[case(
    "/login?callbackUrl=%2Fdashboard%2Finvoices",
    "email=user%40nextmail.com&password=123456&redirectTo=%2Fdashboard%2Fcustomers",
    "http://localhost:3000/dashboard/customers"
)]
#[case(
    "/login?callbackUrl=https%3A%2F%2Fevil.example%2F",
    CREDENTIALS,
    "http://localhost:3000/dashboard"
)]
#[actix_web::test]
async fn sign_in_sets_a_session_and_follows_the_callback(
    ports: TestPorts,
    #[case] uri: &str,
    #[case] body: &str,
    #[case] expected_location: &str,
) {
    let user = UserId::new(USER).expect("user id");
    let app = auth_app!(verifying(ports, Ok(user)));

    let res = test::call_service(&app, login_request(uri, body).to_request()).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get(LOCATION).expect("location"),
        expected_location
    );
    assert!(session_cookie(&res).is_some(), "session cookie issued");
}

#[rstest]
#[case(AuthErrorKind::CredentialsSignin, "Invalid credentials.")]
#[case(AuthErrorKind::Configuration, "Something went wrong.")]
#[actix_web::test]
async fn refusals_are_unauthorised_with_a_message(
    ports: TestPorts,
    #[case] kind: AuthErrorKind,
    #[case] message: &str,
) {
    let app = auth_app!(verifying(ports, Err(SignInError::Auth(kind))));

    let res = test::call_service(&app, login_request("/login", CREDENTIALS).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none(), "no session for refused sign-in");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], message);
}

#[rstest]
#[actix_web::test]
async fn unexpected_failures_become_server_errors(ports: TestPorts) {
    let app = auth_app!(verifying(
        ports,
        Err(SignInError::Unexpected(Error::service_unavailable("db down")))
    ));

    let res = test::call_service(&app, login_request("/login", CREDENTIALS).to_request()).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[actix_web::test]
async fn logout_clears_the_session(ports: TestPorts) {
    let user = UserId::new(USER).expect("user id");
    let app = auth_app!(verifying(ports, Ok(user)));
    let signed_in =
        test::call_service(&app, login_request("/login", CREDENTIALS).to_request()).await;
    let cookie = session_cookie(&signed_in).expect("session cookie");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(LOCATION).expect("location"), "/login");
    assert_eq!(session_cookie(&res).expect("removal cookie").value(), "");
}
