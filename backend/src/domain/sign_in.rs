//! Credential sign-in action.
//!
//! The action delegates verification to a [`CredentialsProvider`] and turns
//! the expected failure kinds into caller-facing messages. Unexpected
//! provider failures are propagated untouched.

use tracing::{info, warn};

use crate::domain::ports::{CredentialsProvider, SignInError};
use crate::domain::{AuthErrorKind, CredentialsForm, Error, UserId};

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";
const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

/// Result of a sign-in attempt that did not fail unexpectedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Credentials matched this account.
    Authenticated(UserId),
    /// Credentials were refused; the message is safe to show.
    Refused(&'static str),
}

/// Verify `form` through `provider`.
pub async fn sign_in(
    provider: &dyn CredentialsProvider,
    form: &CredentialsForm,
) -> Result<SignInOutcome, Error> {
    match provider.verify(form).await {
        Ok(user_id) => {
            info!(%user_id, "sign-in succeeded");
            Ok(SignInOutcome::Authenticated(user_id))
        }
        Err(SignInError::Auth(kind)) => {
            warn!(kind = %kind, "sign-in refused");
            Ok(SignInOutcome::Refused(refusal_message(kind)))
        }
        Err(SignInError::Unexpected(err)) => Err(err),
    }
}

/// Caller-facing message for an expected sign-in failure.
///
/// # Examples
/// ```
/// use dashboard::domain::{AuthErrorKind, refusal_message};
///
/// assert_eq!(refusal_message(AuthErrorKind::CredentialsSignin), "Invalid credentials.");
/// assert_eq!(refusal_message(AuthErrorKind::Configuration), "Something went wrong.");
/// ```
pub fn refusal_message(kind: AuthErrorKind) -> &'static str {
    match kind {
        AuthErrorKind::CredentialsSignin => INVALID_CREDENTIALS_MESSAGE,
        AuthErrorKind::Configuration => GENERIC_FAILURE_MESSAGE,
    }
}
