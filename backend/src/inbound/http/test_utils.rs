//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use url::Url;

use crate::domain::ports::{
    MockCredentialsProvider, MockCustomerRepository, MockInvoiceCommand, MockInvoiceRepository,
    MockRegistrationCommand, MockViewRevalidator,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Name of the session cookie issued by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set on `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Mock ports for handler tests. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct TestPorts {
    pub invoices: MockInvoiceCommand,
    pub invoices_query: MockInvoiceRepository,
    pub customers: MockCustomerRepository,
    pub registration: MockRegistrationCommand,
    pub credentials: MockCredentialsProvider,
    pub revalidator: MockViewRevalidator,
}

impl TestPorts {
    /// Freeze the mocks into handler state rooted at `http://localhost:3000`.
    pub fn into_state(self) -> HttpState {
        let base_url = Url::parse("http://localhost:3000").expect("static base url");
        HttpState::new(
            HttpStatePorts {
                invoices: Arc::new(self.invoices),
                invoices_query: Arc::new(self.invoices_query),
                customers: Arc::new(self.customers),
                registration: Arc::new(self.registration),
                credentials: Arc::new(self.credentials),
                revalidator: Arc::new(self.revalidator),
            },
            base_url,
        )
    }
}
