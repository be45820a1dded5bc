//! Evaluating registered rules
//!
//! [`RulesExt`] is implemented for every [`Registered`] validator. It selects
//! rules from the validator's table and combines their results according to a
//! [`Mode`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::foundation::{Outcome, Severity, ValidatorError, ValidatorResult};
use crate::gate::Gated;
use crate::registry::{Registered, registry};

// ============================================================================
// MODE
// ============================================================================

/// How the results of several rules combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every rule must pass; the first non-OK result is returned.
    #[default]
    #[serde(alias = "and")]
    All,
    /// One passing rule is enough; if none passes, the first failure is
    /// returned.
    #[serde(alias = "or")]
    Any,
}

// ============================================================================
// RULE SELECTION
// ============================================================================

/// Which rules of a validator to run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleSelection {
    /// Every registered rule, in registration order.
    #[default]
    All,
    /// Only the named rules. Each name must be registered.
    Only(Vec<Cow<'static, str>>),
}

impl RuleSelection {
    /// Selects the given rule names.
    pub fn only<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Cow<'static, str>>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn includes(&self, rule: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|name| name == rule),
        }
    }
}

impl<const N: usize> From<[&'static str; N]> for RuleSelection {
    fn from(names: [&'static str; N]) -> Self {
        Self::only(names)
    }
}

impl From<&[&'static str]> for RuleSelection {
    fn from(names: &[&'static str]) -> Self {
        Self::only(names.iter().copied())
    }
}

impl From<Vec<String>> for RuleSelection {
    fn from(names: Vec<String>) -> Self {
        Self::only(names)
    }
}

impl From<Option<Vec<String>>> for RuleSelection {
    fn from(names: Option<Vec<String>>) -> Self {
        names.map_or(Self::All, Self::from)
    }
}

// ============================================================================
// RULE EVALUATION
// ============================================================================

/// Rule evaluation for registered validators.
pub trait RulesExt: Registered {
    /// Runs the selected rules against `input`.
    ///
    /// Rules run in registration order. A rule that returns `Err` stops the
    /// evaluation with [`ValidatorError::RuleFailed`].
    ///
    /// # Errors
    ///
    /// [`ValidatorError::UnknownRule`] if the selection names a rule that is
    /// not registered on `Self`, [`ValidatorError::RuleFailed`] if a rule
    /// fails.
    fn accept(&self, selection: &RuleSelection, mode: Mode, input: &Self::Input) -> Outcome {
        let validator = std::any::type_name::<Self>();
        let table = registry().table::<Self>();

        if let RuleSelection::Only(names) = selection
            && let Some(missing) = names.iter().find(|name| !table.contains(name))
        {
            return Err(ValidatorError::unknown_rule(missing.clone(), validator));
        }

        let mut first_failure = None;
        for rule in table.iter().filter(|rule| selection.includes(rule.name())) {
            let result = rule
                .call(self, input)
                .map_err(|source| {
                    ValidatorError::rule_failed(rule.name_cow().clone(), validator, source)
                })?
                .or_rule(rule.name_cow());
            trace_result(validator, &result);

            match mode {
                Mode::All if !result.is_ok() => return Ok(result),
                Mode::Any if result.is_ok() => return Ok(result),
                Mode::Any => {
                    first_failure.get_or_insert(result);
                }
                Mode::All => {}
            }
        }

        Ok(first_failure.unwrap_or_else(ValidatorResult::ok))
    }

    /// Runs every registered rule; all must pass.
    fn accept_all(&self, input: &Self::Input) -> Outcome {
        self.accept(&RuleSelection::All, Mode::All, input)
    }

    /// Runs `callback` only if the selected rules pass.
    ///
    /// # Errors
    ///
    /// Same as [`accept`](Self::accept).
    fn apply<R, F>(
        &self,
        selection: &RuleSelection,
        mode: Mode,
        input: &Self::Input,
        callback: F,
    ) -> Result<Gated<R>, ValidatorError>
    where
        F: FnOnce(&Self::Input) -> R,
    {
        let result = self.accept(selection, mode, input)?;
        if result.is_ok() {
            Ok(Gated::Passed(callback(input)))
        } else {
            Ok(Gated::Blocked(result))
        }
    }
}

impl<V: Registered> RulesExt for V {}

/// Logs a result at a level matching its severity.
pub(crate) fn trace_result(validator: &str, result: &ValidatorResult) {
    match result.severity() {
        Severity::Ok => debug!(validator, %result, "validation passed"),
        Severity::Warning => warn!(validator, %result, "validation warning"),
        Severity::Error => error!(validator, %result, "validation failed"),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use crate::registry::Registrar;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::Cell;

    thread_local! {
        static EXCEPTION_CALLS: Cell<usize> = const { Cell::new(0) };
    }

    struct Mock;

    impl Mock {
        fn success(&self, _input: &i32) -> Outcome {
            Ok(ValidatorResult::ok())
        }

        fn failure(&self, _input: &i32) -> Outcome {
            ValidatorResult::error("error")
        }

        fn caution(&self, _input: &i32) -> Outcome {
            ValidatorResult::warning("careful")
        }

        fn exception(&self, _input: &i32) -> Outcome {
            EXCEPTION_CALLS.set(EXCEPTION_CALLS.get() + 1);
            Err(ValidatorError::raised("boom"))
        }
    }

    impl Validate for Mock {
        type Input = i32;

        fn validate(&self, input: &i32) -> Outcome {
            self.success(input)
        }
    }

    impl Registered for Mock {
        fn register_rules(rules: &mut Registrar<Self>) {
            rules
                .register(["success", "success2"], "success", Self::success)
                .register(["error"], "failure", Self::failure)
                .register(["warning"], "caution", Self::caution)
                .register(["exception"], "exception", Self::exception);
        }
    }

    #[rstest]
    #[case::single_success(&["success"][..], Mode::All, Severity::Ok)]
    #[case::two_successes(&["success", "success2"][..], Mode::All, Severity::Ok)]
    #[case::and_with_error(&["success", "error"][..], Mode::All, Severity::Error)]
    #[case::and_with_warning(&["success", "warning"][..], Mode::All, Severity::Warning)]
    #[case::or_with_error(&["success", "error"][..], Mode::Any, Severity::Ok)]
    #[case::or_all_failing(&["error", "warning"][..], Mode::Any, Severity::Error)]
    fn accept_combines_by_mode(
        #[case] names: &[&'static str],
        #[case] mode: Mode,
        #[case] expected: Severity,
    ) {
        let result = Mock.accept(&names.into(), mode, &1).unwrap();
        assert_eq!(result.severity(), expected);
    }

    #[test]
    fn failing_result_names_its_rule() {
        let result = Mock.accept(&["error"].into(), Mode::All, &1).unwrap();
        assert_eq!(result.rule(), Some("error"));
        assert_eq!(result.message(), Some("error"));
    }

    #[test]
    fn all_mode_stops_before_later_rules() {
        let before = EXCEPTION_CALLS.get();
        let result = Mock
            .accept(&["error", "exception"].into(), Mode::All, &1)
            .unwrap();
        assert!(result.is_error());
        assert_eq!(EXCEPTION_CALLS.get(), before);
    }

    #[test]
    fn raising_rule_propagates() {
        let err = Mock.accept(&["exception"].into(), Mode::All, &1).unwrap_err();
        assert_eq!(err.code(), "rule_failed");
        assert_eq!(err.rule(), Some("exception"));
    }

    #[test]
    fn unknown_rule_is_a_contract_failure() {
        let err = Mock.accept(&["nope"].into(), Mode::All, &1).unwrap_err();
        assert!(matches!(err, ValidatorError::UnknownRule { .. }));
    }

    #[test]
    fn empty_selection_passes_in_both_modes() {
        let empty = RuleSelection::Only(Vec::new());
        assert!(Mock.accept(&empty, Mode::All, &1).unwrap().is_ok());
        assert!(Mock.accept(&empty, Mode::Any, &1).unwrap().is_ok());
    }

    #[test]
    fn accept_all_stops_at_first_registered_failure() {
        let result = Mock.accept_all(&1).unwrap();
        assert_eq!(result.rule(), Some("error"));
    }

    #[test]
    fn apply_runs_callback_only_on_success() {
        let passed = Mock
            .apply(&["success"].into(), Mode::All, &7, |n| n * 2)
            .unwrap();
        assert_eq!(passed.passed(), Some(14));

        let blocked = Mock
            .apply(&["error"].into(), Mode::All, &7, |_| -> i32 { unreachable!() })
            .unwrap();
        assert!(blocked.is_blocked());

        let either = Mock
            .apply(&["success", "error"].into(), Mode::Any, &7, |_| "callback result")
            .unwrap();
        assert_eq!(either.passed(), Some("callback result"));
    }

    #[test]
    fn selection_conversions() {
        assert_eq!(RuleSelection::from(None::<Vec<String>>), RuleSelection::All);
        let named = RuleSelection::from(Some(vec!["R002".to_string()]));
        assert!(named.includes("R002"));
        assert!(!named.includes("R001"));
        assert!(RuleSelection::All.includes("anything"));
    }

    #[test]
    fn mode_parses_and_or_aliases() {
        let mode: Mode = serde_json::from_str("\"or\"").unwrap();
        assert_eq!(mode, Mode::Any);
        let mode: Mode = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(mode, Mode::All);
    }
}
