//! Per-request authorization decision.
//!
//! The decision is a pure function of the requesting [`Principal`] and the
//! requested path. Paths are classified by prefix, so `/dashboardx` counts
//! as a dashboard path and `/login-help` as an auth page.

use super::action::Redirect;
use super::auth::DEFAULT_CALLBACK_PATH;
use super::registration_service::LOGIN_PATH;
use super::user::UserId;

const DASHBOARD_PREFIX: &str = "/dashboard";
const AUTH_PAGE_PREFIXES: [&str; 2] = ["/login", "/register"];

/// Query parameter carrying the page to return to after signing in.
pub const CALLBACK_URL_PARAM: &str = "callbackUrl";

/// Identity associated with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// No session.
    Anonymous,
    /// Signed-in user.
    Authenticated(UserId),
}

impl Principal {
    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Which access rule a path falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a signed-in user.
    Dashboard,
    /// Sign-in and registration pages.
    AuthPage,
    /// Everything else.
    Public,
}

impl RouteClass {
    /// Classify a request path.
    pub fn classify(path: &str) -> Self {
        if path.starts_with(DASHBOARD_PREFIX) {
            Self::Dashboard
        } else if AUTH_PAGE_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
        {
            Self::AuthPage
        } else {
            Self::Public
        }
    }
}

/// Outcome of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Let the request through.
    Allow,
    /// Refuse; anonymous users are sent to [`sign_in_redirect`].
    Deny,
    /// Send the client elsewhere.
    Redirect(Redirect),
}

/// Decide whether `principal` may access `path`.
///
/// # Examples
/// ```
/// use dashboard::domain::{AccessDecision, Principal, UserId, authorize};
///
/// assert_eq!(authorize(&Principal::Anonymous, "/dashboard"), AccessDecision::Deny);
/// let user = Principal::Authenticated(UserId::random());
/// assert_eq!(authorize(&user, "/dashboard/invoices"), AccessDecision::Allow);
/// ```
pub fn authorize(principal: &Principal, path: &str) -> AccessDecision {
    match (RouteClass::classify(path), principal.is_authenticated()) {
        (RouteClass::Dashboard, true) => AccessDecision::Allow,
        (RouteClass::Dashboard, false) => AccessDecision::Deny,
        (RouteClass::AuthPage, true) => {
            AccessDecision::Redirect(Redirect::to(DEFAULT_CALLBACK_PATH))
        }
        (RouteClass::AuthPage, false) | (RouteClass::Public, _) => AccessDecision::Allow,
    }
}

/// Sign-in page that returns to `requested` once the user signs in.
pub fn sign_in_redirect(requested: &str) -> Redirect {
    Redirect::to(LOGIN_PATH).with_query(CALLBACK_URL_PARAM, requested)
}
