//! Validation outcome values
//!
//! [`ValidatorResult`] is the only way a rule reports a data-driven outcome.
//! It carries a [`Severity`], an optional message, and a little metadata
//! (the rule that produced it, the call site that built it, and free-form
//! parameters).
//!
//! All string fields use `Cow<'static, str>` so static rule names and
//! messages never allocate.
//!
//! # Examples
//!
//! ```rust,ignore
//! use warden_validator::foundation::ValidatorResult;
//!
//! let passed = ValidatorResult::ok();
//! assert!(passed.is_ok());
//!
//! let failed = ValidatorResult::error("age<0")?.with_rule("not_negative");
//! assert!(!failed.is_ok());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::foundation::ValidatorError;

// ============================================================================
// SEVERITY
// ============================================================================

/// Outcome classification of a [`ValidatorResult`].
///
/// Totally ordered: `Ok < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The subject passed.
    Ok,
    /// The subject is acceptable but something deserves attention.
    Warning,
    /// The subject is invalid.
    Error,
}

impl Severity {
    /// Lowercase label used in logs and serialized output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATOR RESULT
// ============================================================================

/// Rule name carried by the result a chain returns when its callback
/// rejects an otherwise valid subject.
pub const CALLBACK_REJECTED_RULE: &str = "chain.callback";

/// Immutable outcome of a validation.
///
/// Built only through [`ok`](Self::ok), [`warning`](Self::warning),
/// [`error`](Self::error) and [`callback_rejected`](Self::callback_rejected).
/// Two results are equal when their severity and message are equal; the rule
/// name, call site and parameters are diagnostics and do not take part in
/// equality.
#[derive(Debug, Clone)]
pub struct ValidatorResult {
    severity: Severity,
    message: Option<Cow<'static, str>>,
    rule: Option<Cow<'static, str>>,
    location: Option<&'static Location<'static>>,
    params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidatorResult {
    /// A passing result with no message.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            severity: Severity::Ok,
            message: None,
            rule: None,
            location: None,
            params: Vec::new(),
        }
    }

    /// A warning result.
    ///
    /// The caller's source location is recorded on the result.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidArgument`] if `message` is empty.
    #[track_caller]
    pub fn warning(message: impl Into<Cow<'static, str>>) -> Result<Self, ValidatorError> {
        Self::failing(Severity::Warning, message.into(), Location::caller())
    }

    /// An error result.
    ///
    /// The caller's source location is recorded on the result.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidArgument`] if `message` is empty.
    #[track_caller]
    pub fn error(message: impl Into<Cow<'static, str>>) -> Result<Self, ValidatorError> {
        Self::failing(Severity::Error, message.into(), Location::caller())
    }

    /// The error a [`ValidatorChain`](crate::chain::ValidatorChain) returns
    /// when its callback rejects a subject every member accepted.
    #[must_use]
    #[track_caller]
    pub fn callback_rejected() -> Self {
        Self {
            severity: Severity::Error,
            message: Some(Cow::Borrowed("chain callback rejected the subject")),
            rule: Some(Cow::Borrowed(CALLBACK_REJECTED_RULE)),
            location: Some(Location::caller()),
            params: Vec::new(),
        }
    }

    fn failing(
        severity: Severity,
        message: Cow<'static, str>,
        location: &'static Location<'static>,
    ) -> Result<Self, ValidatorError> {
        if message.is_empty() {
            return Err(ValidatorError::invalid_argument(format!(
                "{severity} result requires a non-empty message"
            )));
        }
        Ok(Self {
            severity,
            message: Some(message),
            rule: None,
            location: Some(location),
            params: Vec::new(),
        })
    }

    /// Attributes this result to a rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(mut self, rule: impl Into<Cow<'static, str>>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Attaches a named parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Attributes the result to `rule` unless it already names one.
    pub(crate) fn or_rule(self, rule: &Cow<'static, str>) -> Self {
        if self.rule.is_some() {
            self
        } else {
            self.with_rule(rule.clone())
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Name of the rule that produced this result, if known.
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    /// Source location that constructed a warning or error.
    #[must_use]
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    #[must_use]
    pub fn params(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
        &self.params
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// True iff the severity is [`Severity::Ok`].
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.severity == Severity::Ok
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// True if this is the result of a rejecting chain callback.
    #[must_use]
    pub fn is_callback_rejection(&self) -> bool {
        self.is_error() && self.rule() == Some(CALLBACK_REJECTED_RULE)
    }
}

impl Default for ValidatorResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl PartialEq for ValidatorResult {
    fn eq(&self, other: &Self) -> bool {
        self.severity == other.severity && self.message == other.message
    }
}

impl Eq for ValidatorResult {}

impl fmt::Display for ValidatorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{rule}] ")?;
        }
        write!(f, "{}", self.severity)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, ")")?;
        }
        if let Some(location) = self.location {
            write!(f, " at {location}")?;
        }
        Ok(())
    }
}

impl Serialize for ValidatorResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidatorResult", 5)?;
        state.serialize_field("severity", &self.severity)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("rule", &self.rule)?;
        state.serialize_field("location", &self.location.map(ToString::to_string))?;
        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        state.serialize_field("params", &params)?;
        state.end()
    }
}

// ============================================================================
// TESTS
// ============================================================================
