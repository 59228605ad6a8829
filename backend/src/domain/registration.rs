//! Registration form schema.
//!
//! Field rules run independently and every failure is reported. The
//! password confirmation check is a cross-field rule attached to
//! `confirmPassword`; it runs even when other fields already failed.

use zeroize::Zeroizing;

use super::forms::FieldErrors;
use super::user::{EmailAddress, UserName};

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Field name of the display name.
pub const NAME_FIELD: &str = "name";
/// Field name of the email address.
pub const EMAIL_FIELD: &str = "email";
/// Field name of the password.
pub const PASSWORD_FIELD: &str = "password";
/// Field name of the password confirmation.
pub const CONFIRM_PASSWORD_FIELD: &str = "confirmPassword";

const NAME_MESSAGE: &str = "Name is required.";
const EMAIL_MESSAGE: &str = "Please enter a valid email.";
const PASSWORD_MESSAGE: &str = "Password must be at least 6 characters long.";
const CONFIRM_MESSAGE: &str = "Please confirm your password.";
const MISMATCH_MESSAGE: &str = "Passwords don't match.";

/// Raw registration fields; `None` means the field was not submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Raw `name`.
    pub name: Option<String>,
    /// Raw `email`.
    pub email: Option<String>,
    /// Raw `password`.
    pub password: Option<Zeroizing<String>>,
    /// Raw `confirmPassword`.
    pub confirm_password: Option<Zeroizing<String>>,
}

/// Registration input that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    /// Display name.
    pub name: UserName,
    /// Email address.
    pub email: EmailAddress,
    /// Plaintext password, wiped on drop.
    pub password: Zeroizing<String>,
}

fn long_enough(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_CHARS
}

impl RegistrationForm {
    /// Run the registration schema.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::RegistrationForm;
    /// use zeroize::Zeroizing;
    ///
    /// let form = RegistrationForm {
    ///     name: Some("Ada".into()),
    ///     email: Some("ada@example.com".into()),
    ///     password: Some(Zeroizing::new("secret1".into())),
    ///     confirm_password: Some(Zeroizing::new("secret2".into())),
    /// };
    /// let errors = form.validate().unwrap_err();
    /// assert_eq!(
    ///     errors.get("confirmPassword"),
    ///     Some(["Passwords don't match.".to_owned()].as_slice())
    /// );
    /// ```
    pub fn validate(&self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = UserName::new(self.name.clone().unwrap_or_default()).ok();
        if name.is_none() {
            errors.push(NAME_FIELD, NAME_MESSAGE);
        }

        let email = EmailAddress::parse(self.email.clone().unwrap_or_default()).ok();
        if email.is_none() {
            errors.push(EMAIL_FIELD, EMAIL_MESSAGE);
        }

        let password = self.password.as_deref().map_or("", String::as_str);
        if !long_enough(password) {
            errors.push(PASSWORD_FIELD, PASSWORD_MESSAGE);
        }

        let confirm = self.confirm_password.as_deref().map_or("", String::as_str);
        if !long_enough(confirm) {
            errors.push(CONFIRM_PASSWORD_FIELD, CONFIRM_MESSAGE);
        }
        if password != confirm {
            errors.push(CONFIRM_PASSWORD_FIELD, MISMATCH_MESSAGE);
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(ValidRegistration {
                name,
                email,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn secret(value: &str) -> Option<Zeroizing<String>> {
        Some(Zeroizing::new(value.to_owned()))
    }

    #[fixture]
    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            password: secret("engine1"),
            confirm_password: secret("engine1"),
        }
    }

    fn messages(errors: &FieldErrors, field: &str) -> Vec<String> {
        errors.get(field).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[rstest]
    fn valid_form_passes(valid_form: RegistrationForm) {
        let registration = valid_form.validate().expect("valid form");
        assert_eq!(registration.name.as_ref(), "Ada Lovelace");
        assert_eq!(registration.email.as_ref(), "ada@example.com");
        assert_eq!(registration.password.as_str(), "engine1");
    }

    #[rstest]
    fn mismatch_is_reported_on_confirmation_only(mut valid_form: RegistrationForm) {
        valid_form.password = secret("secret1");
        valid_form.confirm_password = secret("secret2");
        let errors = valid_form.validate().expect_err("mismatch");
        assert_eq!(
            messages(&errors, CONFIRM_PASSWORD_FIELD),
            vec![MISMATCH_MESSAGE.to_owned()]
        );
        assert!(!errors.contains(PASSWORD_FIELD));
    }

    #[rstest]
    fn short_passwords_report_length_and_mismatch(mut valid_form: RegistrationForm) {
        valid_form.password = secret("abc");
        valid_form.confirm_password = secret("abd");
        let errors = valid_form.validate().expect_err("short");
        assert_eq!(messages(&errors, PASSWORD_FIELD), vec![PASSWORD_MESSAGE.to_owned()]);
        assert_eq!(
            messages(&errors, CONFIRM_PASSWORD_FIELD),
            vec![CONFIRM_MESSAGE.to_owned(), MISMATCH_MESSAGE.to_owned()]
        );
    }

    #[rstest]
    fn cross_field_rule_runs_alongside_field_failures(mut valid_form: RegistrationForm) {
        valid_form.name = Some(String::new());
        valid_form.email = Some("nope".into());
        valid_form.confirm_password = secret("engine2");
        let errors = valid_form.validate().expect_err("many failures");
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec![CONFIRM_PASSWORD_FIELD, EMAIL_FIELD, NAME_FIELD]);
    }

    #[rstest]
    #[case("ääääää", true)]
    #[case("äääää", false)]
    fn password_length_counts_characters(
        mut valid_form: RegistrationForm,
        #[case] password: &str,
        #[case] accepted: bool,
    ) {
        valid_form.password = secret(password);
        valid_form.confirm_password = secret(password);
        assert_eq!(valid_form.validate().is_ok(), accepted);
    }

    #[rstest]
    fn empty_form_reports_every_field() {
        let errors = RegistrationForm::default().validate().expect_err("empty");
        assert_eq!(messages(&errors, NAME_FIELD), vec![NAME_MESSAGE.to_owned()]);
        assert_eq!(messages(&errors, EMAIL_FIELD), vec![EMAIL_MESSAGE.to_owned()]);
        assert_eq!(messages(&errors, PASSWORD_FIELD), vec![PASSWORD_MESSAGE.to_owned()]);
        assert_eq!(
            messages(&errors, CONFIRM_PASSWORD_FIELD),
            vec![CONFIRM_MESSAGE.to_owned()]
        );
    }
}
