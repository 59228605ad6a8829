//! Outcomes produced by mutating actions.
//!
//! Navigation is a value, not a side exit: every action returns an
//! [`ActionOutcome`] and the inbound adapter decides how to express it on
//! the wire (a `303 See Other` for [`ActionOutcome::Redirect`], a JSON form
//! state otherwise).

use url::form_urlencoded;

use super::forms::{FieldErrors, FormState};

/// Navigation target: a path plus optional query parameters.
///
/// # Examples
/// ```
/// use dashboard::domain::Redirect;
///
/// let target = Redirect::to("/login").with_query("message", "Welcome back!");
/// assert_eq!(target.location(), "/login?message=Welcome+back%21");
/// assert_eq!(target.query_value("message"), Some("Welcome back!"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    path: String,
    query: Vec<(String, String)>,
}

impl Redirect {
    /// Redirect to `path` with no query string.
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter; values are kept decoded.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Target path without the query string.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// First decoded value recorded for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Encoded `Location` value.
    pub fn location(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{encoded}", self.path)
    }
}

/// Result of running a mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Input was refused before anything was written.
    Invalid(FormState),
    /// Storage failed; nothing was persisted and no navigation happens.
    Failed(FormState),
    /// The action succeeded and the client should navigate.
    Redirect(Redirect),
    /// The action succeeded and the client stays where it is.
    Done,
}

impl ActionOutcome {
    /// Refusal carrying field errors and a summary message.
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self::Invalid(FormState::with_errors(errors, message))
    }

    /// Refusal carrying only a summary message.
    pub fn refused(message: impl Into<String>) -> Self {
        Self::Invalid(FormState::with_message(message))
    }

    /// Storage failure with a caller-facing message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(FormState::with_message(message))
    }
}
