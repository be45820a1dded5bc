//! Contract and programming failures
//!
//! [`ValidatorError`] is the second failure channel. A subject that fails a
//! rule is reported as a [`ValidatorResult`](crate::foundation::ValidatorResult)
//! with `Warning` or `Error` severity; a [`ValidatorError`] means the caller or
//! a rule broke a contract, and it always propagates up the call stack.

use std::borrow::Cow;

/// Boxed error raised by rule code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Contract failure raised while validating.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ValidatorError {
    /// An operation received an argument that violates its contract.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: Cow<'static, str> },

    /// A rule selection named a rule the validator never registered.
    #[error("rule `{rule}` is not registered on `{validator}`")]
    UnknownRule {
        rule: Cow<'static, str>,
        validator: &'static str,
    },

    /// A rule failed instead of producing a result.
    #[error("rule `{rule}` of `{validator}` failed: {source}")]
    RuleFailed {
        rule: Cow<'static, str>,
        validator: &'static str,
        #[source]
        source: Box<ValidatorError>,
    },

    /// The owner of a gated operation cannot be adapted to the capability.
    #[error("no adapter found for `{capability}`")]
    AdapterNotFound { capability: &'static str },

    /// Rule code gave up with its own message.
    #[error("{message}")]
    Raised { message: Cow<'static, str> },

    /// Rule code failed with a foreign error.
    #[error(transparent)]
    Other(#[from] BoxError),

    /// Gate configuration could not be parsed.
    #[error("invalid gate configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ValidatorError {
    pub fn invalid_argument(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// An error raised from inside a rule.
    pub fn raised(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Raised {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_rule(rule: impl Into<Cow<'static, str>>, validator: &'static str) -> Self {
        Self::UnknownRule {
            rule: rule.into(),
            validator,
        }
    }

    pub(crate) fn rule_failed(
        rule: impl Into<Cow<'static, str>>,
        validator: &'static str,
        source: ValidatorError,
    ) -> Self {
        Self::RuleFailed {
            rule: rule.into(),
            validator,
            source: Box::new(source),
        }
    }

    pub(crate) fn adapter_not_found<C: ?Sized>() -> Self {
        Self::AdapterNotFound {
            capability: std::any::type_name::<C>(),
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::UnknownRule { .. } => "unknown_rule",
            Self::RuleFailed { .. } => "rule_failed",
            Self::AdapterNotFound { .. } => "adapter_not_found",
            Self::Raised { .. } => "raised",
            Self::Other(_) => "other",
            Self::Config(_) => "config",
        }
    }

    /// Name of the rule that failed, for [`RuleFailed`](Self::RuleFailed)
    /// and [`UnknownRule`](Self::UnknownRule).
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::UnknownRule { rule, .. } | Self::RuleFailed { rule, .. } => Some(rule.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn rule_failed_keeps_its_source() {
        let err = ValidatorError::rule_failed("R001", "Users", ValidatorError::raised("bad name"));
        assert_eq!(err.code(), "rule_failed");
        assert_eq!(err.rule(), Some("R001"));
        assert_eq!(err.source().unwrap().to_string(), "bad name");
        assert_eq!(
            err.to_string(),
            "rule `R001` of `Users` failed: bad name"
        );
    }

    #[test]
    fn foreign_errors_convert() {
        let io = std::io::Error::other("disk");
        let err: ValidatorError = BoxError::from(io).into();
        assert_eq!(err.code(), "other");
        assert_eq!(err.to_string(), "disk");
    }

    #[test]
    fn adapter_not_found_names_the_capability() {
        let err = ValidatorError::adapter_not_found::<String>();
        assert!(err.to_string().contains("String"));
        assert_eq!(err.rule(), None);
    }
}
