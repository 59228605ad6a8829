//! Port for verifying sign-in credentials.
//!
//! Providers report the expected failure families through
//! [`SignInError::Auth`]; anything else is [`SignInError::Unexpected`] and
//! is not turned into a user-facing message.

use async_trait::async_trait;

use crate::domain::{AuthErrorKind, CredentialsForm, Error, UserId};

/// Failure raised by a [`CredentialsProvider`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignInError {
    /// Expected authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthErrorKind),
    /// Failure outside the authentication families.
    #[error(transparent)]
    Unexpected(#[from] Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Verify a submitted form and return the matching account.
    async fn verify(&self, form: &CredentialsForm) -> Result<UserId, SignInError>;
}
