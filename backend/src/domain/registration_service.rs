//! Account registration service.
//!
//! Validates the form, refuses duplicate emails, hashes the password, and
//! inserts the account. Storage and hashing failures are logged with their
//! detail and reported to the caller with a single generic message.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, RegistrationCommand, UserPersistenceError, UserRepository,
};
use crate::domain::{ActionOutcome, NewUser, Redirect, RegistrationForm};

/// Sign-in page the user is sent to after registering.
pub const LOGIN_PATH: &str = "/login";
/// Notice shown on the sign-in page after registering.
pub const REGISTERED_NOTICE: &str = "Registration successful! Please log in.";

const INVALID_MESSAGE: &str = "Missing Fields. Failed to Create Account.";
const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists. Please use a different email address.";
const FAILED_MESSAGE: &str = "Database Error: Failed to create account. Please try again.";

#[derive(Debug, thiserror::Error)]
enum RegistrationFailure {
    #[error(transparent)]
    Storage(#[from] UserPersistenceError),
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
}

/// Registration service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> RegistrationService<U, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> RegistrationService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn create_account(
        &self,
        form: &RegistrationForm,
    ) -> Result<ActionOutcome, RegistrationFailure> {
        let registration = match form.validate() {
            Ok(registration) => registration,
            Err(errors) => return Ok(ActionOutcome::invalid(errors, INVALID_MESSAGE)),
        };

        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Ok(ActionOutcome::refused(DUPLICATE_EMAIL_MESSAGE));
        }

        let password = self.hasher.hash(registration.password.as_str()).await?;
        let new_user = NewUser {
            name: registration.name,
            email: registration.email,
            password,
        };

        match self.users.insert(&new_user).await {
            Ok(user_id) => {
                info!(%user_id, "account registered");
                Ok(ActionOutcome::Redirect(
                    Redirect::to(LOGIN_PATH).with_query("message", REGISTERED_NOTICE),
                ))
            }
            Err(UserPersistenceError::DuplicateEmail) => {
                Ok(ActionOutcome::refused(DUPLICATE_EMAIL_MESSAGE))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<U, H> RegistrationCommand for RegistrationService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, form: RegistrationForm) -> ActionOutcome {
        self.create_account(&form).await.unwrap_or_else(|err| {
            error!(error = %err, "registration failed");
            ActionOutcome::failed(FAILED_MESSAGE)
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::domain::{
        EmailAddress, PasswordDigest, User, UserId, UserName, registration::EMAIL_FIELD,
    };
    use rstest::{fixture, rstest};
    use zeroize::Zeroizing;

    #[fixture]
    fn form() -> RegistrationForm {
        RegistrationForm {
            name: Some("Grace Hopper".into()),
            email: Some("grace@example.com".into()),
            password: Some(Zeroizing::new("cobol1959".into())),
            confirm_password: Some(Zeroizing::new("cobol1959".into())),
        }
    }

    fn digest() -> PasswordDigest {
        PasswordDigest::new("$2b$10$abcdefghijklmnopqrstuv").expect("digest")
    }

    fn hasher_returning_digest() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password: &str| password == "cobol1959")
            .times(1)
            .return_once(|_| Ok(digest()));
        hasher
    }

    fn existing_user() -> User {
        User {
            id: UserId::random(),
            name: UserName::new("Grace").expect("name"),
            email: EmailAddress::parse("grace@example.com").expect("email"),
            password: digest(),
        }
    }

    fn service(
        users: MockUserRepository,
        hasher: MockPasswordHasher,
    ) -> RegistrationService<MockUserRepository, MockPasswordHasher> {
        RegistrationService::new(Arc::new(users), Arc::new(hasher))
    }

    #[rstest]
    #[tokio::test]
    async fn registers_and_redirects_to_login(form: RegistrationForm) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        users
            .expect_insert()
            .withf(|user: &NewUser| {
                user.email.as_ref() == "grace@example.com" && user.password == digest()
            })
            .times(1)
            .return_once(|_| Ok(UserId::random()));

        let outcome = service(users, hasher_returning_digest()).register(form).await;

        let ActionOutcome::Redirect(target) = outcome else {
            panic!("expected redirect, got {outcome:?}");
        };
        assert_eq!(target.path(), LOGIN_PATH);
        assert_eq!(target.query_value("message"), Some(REGISTERED_NOTICE));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_form_touches_nothing(mut form: RegistrationForm) {
        form.email = Some("grace".into());
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().times(0);
        users.expect_insert().times(0);
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().times(0);

        let outcome = service(users, hasher).register(form).await;

        let ActionOutcome::Invalid(state) = outcome else {
            panic!("expected invalid outcome, got {outcome:?}");
        };
        assert!(state.errors.contains(EMAIL_FIELD));
        assert_eq!(state.message.as_deref(), Some(INVALID_MESSAGE));
    }

    #[rstest]
    #[tokio::test]
    async fn existing_email_is_refused_before_hashing(form: RegistrationForm) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(existing_user())));
        users.expect_insert().times(0);
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().times(0);

        let outcome = service(users, hasher).register(form).await;

        assert_eq!(outcome, ActionOutcome::refused(DUPLICATE_EMAIL_MESSAGE));
    }

    #[rstest]
    #[tokio::test]
    async fn unique_violation_on_insert_is_a_duplicate(form: RegistrationForm) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        users
            .expect_insert()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::duplicate_email()));

        let outcome = service(users, hasher_returning_digest()).register(form).await;

        assert_eq!(outcome, ActionOutcome::refused(DUPLICATE_EMAIL_MESSAGE));
    }

    #[rstest]
    #[case::lookup(true)]
    #[case::insert(false)]
    #[tokio::test]
    async fn storage_failures_use_the_generic_message(
        form: RegistrationForm,
        #[case] fail_lookup: bool,
    ) {
        let mut users = MockUserRepository::new();
        let mut hasher = MockPasswordHasher::new();
        if fail_lookup {
            users
                .expect_find_by_email()
                .times(1)
                .return_once(|_| Err(UserPersistenceError::connection("secret host detail")));
            hasher.expect_hash().times(0);
        } else {
            users
                .expect_find_by_email()
                .times(1)
                .return_once(|_| Ok(None));
            users
                .expect_insert()
                .times(1)
                .return_once(|_| Err(UserPersistenceError::query("secret host detail")));
            hasher = hasher_returning_digest();
        }

        let outcome = service(users, hasher).register(form).await;

        assert_eq!(outcome, ActionOutcome::failed(FAILED_MESSAGE));
    }

    #[rstest]
    #[tokio::test]
    async fn hashing_failure_uses_the_generic_message(form: RegistrationForm) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        users.expect_insert().times(0);
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .return_once(|_| Err(PasswordHashError::hash("invalid cost")));

        let outcome = service(users, hasher).register(form).await;

        assert_eq!(outcome, ActionOutcome::failed(FAILED_MESSAGE));
    }
}
