//! Authentication primitives: sign-in credentials, failure kinds, and
//! post-sign-in callback resolution.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use url::Url;
use zeroize::Zeroizing;

use super::registration::PASSWORD_MIN_CHARS;
use super::user::EmailAddress;

/// Path users land on after signing in without a callback.
pub const DEFAULT_CALLBACK_PATH: &str = "/dashboard";

/// Domain error returned when sign-in payload values are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password was missing or shorter than the minimum length.
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
}

/// Raw sign-in fields; `None` means the field was not submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialsForm {
    /// Raw `email`.
    pub email: Option<String>,
    /// Raw `password`.
    pub password: Option<Zeroizing<String>>,
}

/// Validated sign-in credentials used by credential providers.
///
/// ## Invariants
/// - `email` is syntactically valid.
/// - `password` has at least six characters and keeps caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use dashboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("user@nextmail.com", "123456").unwrap();
/// assert_eq!(creds.email().as_ref(), "user@nextmail.com");
/// assert_eq!(creds.password(), "123456");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::parse(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(LoginValidationError::PasswordTooShort);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Construct credentials from a submitted form.
    pub fn try_from_form(form: &CredentialsForm) -> Result<Self, LoginValidationError> {
        Self::try_from_parts(
            form.email.as_deref().unwrap_or_default(),
            form.password.as_deref().map_or("", String::as_str),
        )
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Expected sign-in failure families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthErrorKind {
    /// Credentials were missing, unknown, or wrong.
    #[error("credentials sign-in failed")]
    CredentialsSignin,
    /// The provider is misconfigured or holds unusable data.
    #[error("authentication is misconfigured")]
    Configuration,
}

/// Resolve where to send a user after signing in.
///
/// Relative callbacks are joined to `base`; absolute callbacks are kept
/// only when they share `base`'s origin. Everything else lands on
/// [`DEFAULT_CALLBACK_PATH`].
///
/// # Examples
/// ```
/// use dashboard::domain::resolve_callback_url;
/// use url::Url;
///
/// let base = Url::parse("http://localhost:3000").unwrap();
/// assert_eq!(
///     resolve_callback_url(Some("/dashboard/invoices"), &base),
///     "http://localhost:3000/dashboard/invoices"
/// );
/// assert_eq!(
///     resolve_callback_url(Some("https://evil.example/"), &base),
///     "http://localhost:3000/dashboard"
/// );
/// ```
pub fn resolve_callback_url(callback: Option<&str>, base: &Url) -> String {
    let origin = base.as_str().trim_end_matches('/');
    let candidate = match callback {
        Some(relative) if relative.starts_with('/') => Url::parse(&format!("{origin}{relative}")).ok(),
        Some(absolute) => Url::parse(absolute).ok(),
        None => None,
    };

    candidate
        .filter(|url| url.origin() == base.origin())
        .map_or_else(|| format!("{origin}{DEFAULT_CALLBACK_PATH}"), String::from)
}
