//! Form-state primitives shared by every mutating action.
//!
//! A [`FormState`] is what an action hands back instead of redirecting: the
//! field-scoped validation messages plus an optional summary message. The
//! serialised shape matches what form renderers consume:
//!
//! ```json
//! {"errors": {"amount": ["Please enter an amount greater than $0."]},
//!  "message": "Missing Fields. Failed to Create Invoice."}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ordered validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to the list for `field`, preserving insertion order.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Whether `field` has at least one message.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the fields that failed.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// State returned to the form when an action does not redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// Field-scoped validation messages.
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    /// Summary message for the whole form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    /// State carrying field errors and a summary message.
    pub fn with_errors(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: Some(message.into()),
        }
    }

    /// State carrying only a summary message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            errors: FieldErrors::new(),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn messages_keep_insertion_order_per_field() {
        let mut errors = FieldErrors::new();
        errors.push("confirmPassword", "first");
        errors.push("confirmPassword", "second");
        assert_eq!(
            errors.get("confirmPassword"),
            Some(["first".to_owned(), "second".to_owned()].as_slice())
        );
    }

    #[test]
    fn message_only_state_omits_errors() {
        let value = serde_json::to_value(FormState::with_message("nope")).expect("json");
        assert_eq!(value, json!({ "message": "nope" }));
    }

    #[test]
    fn field_errors_serialise_as_a_plain_map() {
        let mut errors = FieldErrors::new();
        errors.push("amount", "too small");
        let value = serde_json::to_value(FormState::with_errors(errors, "failed")).expect("json");
        assert_eq!(
            value,
            json!({ "errors": { "amount": ["too small"] }, "message": "failed" })
        );
    }
}
