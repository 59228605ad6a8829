//! [`CredentialsProvider`] backed by the user repository and a password
//! hasher.
//!
//! Malformed input, unknown emails, and wrong passwords all surface as
//! [`AuthErrorKind::CredentialsSignin`] so callers cannot tell them apart.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{
    CredentialsProvider, PasswordHashError, PasswordHasher, SignInError, UserPersistenceError,
    UserRepository,
};
use crate::domain::{AuthErrorKind, CredentialsForm, Error, LoginCredentials, UserId};

/// Credential verification over stored accounts.
#[derive(Clone)]
pub struct RepositoryCredentialsProvider<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> RepositoryCredentialsProvider<U, H> {
    /// Create a provider over the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn storage_error(err: UserPersistenceError) -> SignInError {
    let error = match err {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        other => Error::internal(other.to_string()),
    };
    SignInError::Unexpected(error)
}

#[async_trait]
impl<U, H> CredentialsProvider for RepositoryCredentialsProvider<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn verify(&self, form: &CredentialsForm) -> Result<UserId, SignInError> {
        let credentials = LoginCredentials::try_from_form(form).map_err(|err| {
            warn!(reason = %err, "sign-in form rejected");
            AuthErrorKind::CredentialsSignin
        })?;

        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(storage_error)?
        else {
            return Err(AuthErrorKind::CredentialsSignin.into());
        };

        match self.hasher.verify(credentials.password(), &user.password).await {
            Ok(true) => Ok(user.id),
            Ok(false) => Err(AuthErrorKind::CredentialsSignin.into()),
            Err(PasswordHashError::MalformedDigest { message }) => {
                error!(user_id = %user.id, %message, "stored password digest is unusable");
                Err(AuthErrorKind::Configuration.into())
            }
            Err(err) => Err(SignInError::Unexpected(Error::internal(err.to_string()))),
        }
    }
}
