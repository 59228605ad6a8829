//! Invoice aggregate and the invoice form schema.
//!
//! ## Invariants
//! - [`AmountCents`] is strictly positive; it is the only way an amount
//!   reaches persistence.
//! - [`InvoiceStatus`] is closed over `pending` and `paid`.
//! - Identifiers are opaque, non-empty strings.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::forms::FieldErrors;

/// Field name of the customer reference in invoice forms.
pub const CUSTOMER_ID_FIELD: &str = "customerId";
/// Field name of the amount in invoice forms.
pub const AMOUNT_FIELD: &str = "amount";
/// Field name of the status in invoice forms.
pub const STATUS_FIELD: &str = "status";

const CUSTOMER_MESSAGE: &str = "Please select a customer.";
const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
const AMOUNT_PRECISION_MESSAGE: &str = "Please enter an amount with at most two decimal places.";
const AMOUNT_RANGE_MESSAGE: &str = "Please enter a smaller amount.";
const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Validation errors for individual invoice values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvoiceValidationError {
    /// An identifier was empty.
    #[error("identifier must not be empty")]
    EmptyId,
    /// The amount text is not a decimal number.
    #[error("amount is not a number")]
    AmountNotANumber,
    /// The amount is zero or negative.
    #[error("amount must be greater than zero")]
    AmountNotPositive,
    /// The amount has sub-cent precision.
    #[error("amount has more than two decimal places")]
    AmountTooPrecise,
    /// The amount does not fit the storage column.
    #[error("amount is out of range")]
    AmountOutOfRange,
    /// The status is neither `pending` nor `paid`.
    #[error("status must be pending or paid")]
    UnknownStatus,
}

impl InvoiceValidationError {
    fn form_message(self) -> &'static str {
        match self {
            Self::EmptyId => CUSTOMER_MESSAGE,
            Self::AmountNotANumber | Self::AmountNotPositive => AMOUNT_MESSAGE,
            Self::AmountTooPrecise => AMOUNT_PRECISION_MESSAGE,
            Self::AmountOutOfRange => AMOUNT_RANGE_MESSAGE,
            Self::UnknownStatus => STATUS_MESSAGE,
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(try_from = "String", into = "String")]
        #[schema(value_type = String)]
        pub struct $name(String);

        impl $name {
            /// Construct from raw text, rejecting empty input.
            pub fn new(raw: impl Into<String>) -> Result<Self, InvoiceValidationError> {
                let raw = raw.into();
                if raw.is_empty() {
                    return Err(InvoiceValidationError::EmptyId);
                }
                Ok(Self(raw))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvoiceValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

opaque_id! {
    /// Opaque invoice identifier.
    InvoiceId
}

opaque_id! {
    /// Opaque customer identifier referenced by invoices.
    CustomerId
}

impl InvoiceId {
    /// Fresh identifier for a new invoice.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Payment state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting payment.
    Pending,
    /// Settled.
    Paid,
}

impl InvoiceStatus {
    /// Lowercase wire and storage form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = InvoiceValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(InvoiceValidationError::UnknownStatus),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strictly positive monetary amount in integer cents.
///
/// # Examples
/// ```
/// use dashboard::domain::AmountCents;
///
/// let amount = AmountCents::parse_decimal("12.50").unwrap();
/// assert_eq!(amount.cents(), 1250);
/// assert_eq!(amount.to_string(), "12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i64", into = "i64")]
#[schema(value_type = i64)]
pub struct AmountCents(i64);

impl AmountCents {
    /// Wrap a stored cent value.
    pub fn from_cents(cents: i64) -> Result<Self, InvoiceValidationError> {
        if cents <= 0 {
            return Err(InvoiceValidationError::AmountNotPositive);
        }
        Ok(Self(cents))
    }

    /// Parse a decimal dollar amount such as `"12.5"`, `" 3 "` or `"1e2"`.
    ///
    /// Surrounding whitespace is ignored and blank input counts as zero.
    /// Exponent notation is accepted; hexadecimal and `Infinity` are not.
    /// Conversion to cents is exact; sub-cent precision is rejected rather
    /// than rounded.
    pub fn parse_decimal(raw: &str) -> Result<Self, InvoiceValidationError> {
        Self::from_cents(parse_cents(raw.trim())?)
    }

    /// Value in cents.
    pub fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AmountCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl From<AmountCents> for i64 {
    fn from(value: AmountCents) -> Self {
        value.0
    }
}

impl TryFrom<i64> for AmountCents {
    type Error = InvoiceValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_cents(value)
    }
}

const MAX_EXPONENT: u32 = 10_000;

fn parse_cents(text: &str) -> Result<i64, InvoiceValidationError> {
    if text.is_empty() {
        return Ok(0);
    }

    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, parse_exponent(exponent)?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(InvoiceValidationError::AmountNotANumber);
    }
    let (whole, fraction) = shift_point(whole, fraction, exponent);

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > 2 {
        return Err(InvoiceValidationError::AmountTooPrecise);
    }

    let whole_value = whole.bytes().try_fold(0_i64, |acc, digit| {
        acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
    });
    let fraction_value = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(2)
        .fold(0_i64, |acc, digit| acc * 10 + i64::from(digit - b'0'));
    let cents = whole_value
        .and_then(|value| value.checked_mul(100))
        .and_then(|value| value.checked_add(fraction_value))
        .ok_or(InvoiceValidationError::AmountOutOfRange)?;

    Ok(if negative { -cents } else { cents })
}

fn all_digits(part: &str) -> bool {
    part.bytes().all(|byte| byte.is_ascii_digit())
}

/// Signed decimal exponent, saturated at [`MAX_EXPONENT`].
fn parse_exponent(text: &str) -> Result<i64, InvoiceValidationError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !all_digits(digits) {
        return Err(InvoiceValidationError::AmountNotANumber);
    }
    let magnitude = digits
        .bytes()
        .try_fold(0_u32, |acc, digit| {
            acc.checked_mul(10)?.checked_add(u32::from(digit - b'0'))
        })
        .map_or(MAX_EXPONENT, |value| value.min(MAX_EXPONENT));
    let magnitude = i64::from(magnitude);
    Ok(if negative { -magnitude } else { magnitude })
}

/// Move the decimal point of `whole.fraction` by `exponent` places.
fn shift_point(whole: &str, fraction: &str, exponent: i64) -> (String, String) {
    let digits = format!("{whole}{fraction}");
    let point = i64::try_from(whole.len()).unwrap_or(i64::MAX).saturating_add(exponent);
    match usize::try_from(point) {
        Err(_) => {
            let padding = usize::try_from(-point).unwrap_or(0);
            (String::new(), format!("{}{digits}", "0".repeat(padding)))
        }
        Ok(point) if point >= digits.len() => {
            let padding = point - digits.len();
            (format!("{digits}{}", "0".repeat(padding)), String::new())
        }
        Ok(point) => (digits[..point].to_owned(), digits[point..].to_owned()),
    }
}

/// Validated invoice fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    /// Referenced customer.
    pub customer_id: CustomerId,
    /// Positive amount in cents.
    pub amount: AmountCents,
    /// Payment state.
    pub status: InvoiceStatus,
}

/// Persisted invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Identifier.
    pub id: InvoiceId,
    /// Referenced customer.
    pub customer_id: CustomerId,
    /// Amount in cents.
    pub amount: AmountCents,
    /// Payment state.
    pub status: InvoiceStatus,
    /// Issue date.
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
}

impl Invoice {
    /// Build a new invoice from a validated draft.
    pub fn issue(id: InvoiceId, draft: InvoiceDraft, date: NaiveDate) -> Self {
        let InvoiceDraft {
            customer_id,
            amount,
            status,
        } = draft;
        Self {
            id,
            customer_id,
            amount,
            status,
            date,
        }
    }
}

/// Raw invoice form fields; `None` means the field was not submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceForm {
    /// Raw `customerId`.
    pub customer_id: Option<String>,
    /// Raw `amount`.
    pub amount: Option<String>,
    /// Raw `status`.
    pub status: Option<String>,
}

impl InvoiceForm {
    /// Run the invoice schema, collecting every failing field.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::InvoiceForm;
    ///
    /// let form = InvoiceForm {
    ///     customer_id: Some("c1".into()),
    ///     amount: Some("0".into()),
    ///     status: Some("pending".into()),
    /// };
    /// let errors = form.validate().unwrap_err();
    /// assert!(errors.contains("amount"));
    /// ```
    pub fn validate(&self) -> Result<InvoiceDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = CustomerId::new(self.customer_id.clone().unwrap_or_default());
        let amount = AmountCents::parse_decimal(self.amount.as_deref().unwrap_or_default());
        let status = self
            .status
            .as_deref()
            .ok_or(InvoiceValidationError::UnknownStatus)
            .and_then(InvoiceStatus::from_str);

        record(&mut errors, CUSTOMER_ID_FIELD, &customer_id);
        record(&mut errors, AMOUNT_FIELD, &amount);
        record(&mut errors, STATUS_FIELD, &status);

        match (customer_id, amount, status) {
            (Ok(customer_id), Ok(amount), Ok(status)) => Ok(InvoiceDraft {
                customer_id,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }
}

fn record<T>(errors: &mut FieldErrors, field: &str, result: &Result<T, InvoiceValidationError>) {
    if let Err(error) = result {
        errors.push(field, error.form_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form(customer_id: Option<&str>, amount: Option<&str>, status: Option<&str>) -> InvoiceForm {
        InvoiceForm {
            customer_id: customer_id.map(str::to_owned),
            amount: amount.map(str::to_owned),
            status: status.map(str::to_owned),
        }
    }

    #[rstest]
    #[case("12.50", 1250)]
    #[case("12.5", 1250)]
    #[case(" 7 ", 700)]
    #[case("0.01", 1)]
    #[case(".5", 50)]
    #[case("3.", 300)]
    #[case("+4.20", 420)]
    #[case("1.230", 123)]
    #[case("1e2", 10_000)]
    #[case("1.5E1", 1500)]
    #[case("125e-2", 125)]
    #[case("5e-2", 5)]
    #[case("2e+0", 200)]
    fn parses_decimal_amounts_exactly(#[case] raw: &str, #[case] cents: i64) {
        assert_eq!(AmountCents::parse_decimal(raw).map(AmountCents::cents), Ok(cents));
    }

    #[rstest]
    #[case("0", InvoiceValidationError::AmountNotPositive)]
    #[case("", InvoiceValidationError::AmountNotPositive)]
    #[case("-5", InvoiceValidationError::AmountNotPositive)]
    #[case("0.00", InvoiceValidationError::AmountNotPositive)]
    #[case("abc", InvoiceValidationError::AmountNotANumber)]
    #[case(".", InvoiceValidationError::AmountNotANumber)]
    #[case("1,5", InvoiceValidationError::AmountNotANumber)]
    #[case("1.005", InvoiceValidationError::AmountTooPrecise)]
    #[case("1e-3", InvoiceValidationError::AmountTooPrecise)]
    #[case("0e5", InvoiceValidationError::AmountNotPositive)]
    #[case("1e", InvoiceValidationError::AmountNotANumber)]
    #[case("e2", InvoiceValidationError::AmountNotANumber)]
    #[case("1e2.5", InvoiceValidationError::AmountNotANumber)]
    #[case("1e99", InvoiceValidationError::AmountOutOfRange)]
    #[case("99999999999999999999", InvoiceValidationError::AmountOutOfRange)]
    fn rejects_invalid_amounts(#[case] raw: &str, #[case] expected: InvoiceValidationError) {
        assert_eq!(AmountCents::parse_decimal(raw), Err(expected));
    }

    #[rstest]
    fn stored_cents_read_back_as_the_submitted_decimal() {
        let amount = AmountCents::parse_decimal("12.50").expect("valid amount");
        let stored = i64::from(amount);
        assert_eq!(stored, 1250);
        let read_back = AmountCents::from_cents(stored).expect("stored amount");
        assert_eq!(read_back.to_string(), "12.50");
    }

    #[rstest]
    fn valid_form_produces_draft() {
        let draft = form(Some("c1"), Some("12.50"), Some("paid"))
            .validate()
            .expect("valid form");
        assert_eq!(draft.customer_id.as_ref(), "c1");
        assert_eq!(draft.amount.cents(), 1250);
        assert_eq!(draft.status, InvoiceStatus::Paid);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("-0.01")]
    fn non_positive_amount_is_a_field_error(#[case] amount: &str) {
        let errors = form(Some("c1"), Some(amount), Some("pending"))
            .validate()
            .expect_err("amount must fail");
        assert_eq!(
            errors.get(AMOUNT_FIELD),
            Some([AMOUNT_MESSAGE.to_owned()].as_slice())
        );
        assert!(!errors.contains(CUSTOMER_ID_FIELD));
        assert!(!errors.contains(STATUS_FIELD));
    }

    #[rstest]
    #[case(Some("overdue"))]
    #[case(Some("PAID"))]
    #[case(Some(""))]
    #[case(None)]
    fn unknown_status_is_a_field_error(#[case] status: Option<&str>) {
        let errors = form(Some("c1"), Some("10"), status)
            .validate()
            .expect_err("status must fail");
        assert_eq!(
            errors.get(STATUS_FIELD),
            Some([STATUS_MESSAGE.to_owned()].as_slice())
        );
    }

    #[rstest]
    fn empty_form_reports_every_field() {
        let errors = InvoiceForm::default().validate().expect_err("empty form");
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec![AMOUNT_FIELD, CUSTOMER_ID_FIELD, STATUS_FIELD]);
    }

    #[rstest]
    fn status_serialises_lowercase() {
        let value = serde_json::to_value(InvoiceStatus::Pending).expect("json");
        assert_eq!(value, serde_json::json!("pending"));
    }
}
