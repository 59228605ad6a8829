//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{ActionOutcome, RegistrationForm};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate the form, create the account, and redirect to sign-in.
    async fn register(&self, form: RegistrationForm) -> ActionOutcome;
}
