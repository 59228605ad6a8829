//! Domain primitives, services, and ports.
//!
//! Purpose: keep validation, the mutating actions, and the authorization
//! decision free of transport and storage concerns. Adapters talk to the
//! domain through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - FieldErrors / FormState / ActionOutcome / Redirect: what actions return.
//! - InvoiceForm / RegistrationForm / CredentialsForm: raw form input.
//! - InvoiceActions / RegistrationService / sign_in: the actions.
//! - authorize / Principal: the per-request gate.

pub mod action;
pub mod auth;
pub mod authorization;
pub mod customer;
pub mod error;
pub mod forms;
pub mod invoice;
pub mod invoice_actions;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod sign_in;
pub mod trace_id;
pub mod user;

pub use self::action::{ActionOutcome, Redirect};
pub use self::auth::{
    AuthErrorKind, CredentialsForm, DEFAULT_CALLBACK_PATH, LoginCredentials,
    LoginValidationError, resolve_callback_url,
};
pub use self::authorization::{
    AccessDecision, CALLBACK_URL_PARAM, Principal, RouteClass, authorize, sign_in_redirect,
};
pub use self::customer::Customer;
pub use self::error::{Error, ErrorCode};
pub use self::forms::{FieldErrors, FormState};
pub use self::invoice::{
    AmountCents, CustomerId, Invoice, InvoiceDraft, InvoiceForm, InvoiceId, InvoiceStatus,
    InvoiceValidationError,
};
pub use self::invoice_actions::{INVOICES_PATH, InvoiceActions};
pub use self::registration::{RegistrationForm, ValidRegistration};
pub use self::registration_service::{LOGIN_PATH, REGISTERED_NOTICE, RegistrationService};
pub use self::sign_in::{SignInOutcome, refusal_message, sign_in};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, PasswordDigest, User, UserId, UserName, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use dashboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
