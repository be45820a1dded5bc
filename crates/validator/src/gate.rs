//! Guarding operations with validation rules
//!
//! A [`Gate`] wraps an operation so that it only runs when the selected
//! rules of a validator accept one of its arguments. The validator is not
//! passed in: it is looked up on the operation's owner through
//! [`adapt`](crate::adapter::adapt).
//!
//! ```rust,ignore
//! let append = gate::<UserValidator>(RuleSelection::All)
//!     .subject(|user: &User| user)
//!     .guard(|service: &UserService, user: User| service.store(user));
//!
//! match append.call(&service, user)? {
//!     Gated::Passed(()) => {}
//!     Gated::Blocked(result) => eprintln!("{result}"),
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::adapter::{Adapter, adapt};
use crate::config::GateConfig;
use crate::foundation::{ValidatorError, ValidatorResult};
use crate::registry::Registered;
use crate::rules::{Mode, RuleSelection, RulesExt};

// ============================================================================
// GATED OUTCOME
// ============================================================================

/// The outcome of a guarded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a blocked operation carries the result that blocked it"]
pub enum Gated<R> {
    /// Validation passed and the operation returned `R`.
    Passed(R),
    /// Validation did not pass; the operation was not invoked.
    Blocked(ValidatorResult),
}

impl<R> Gated<R> {
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed(_))
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }

    /// The operation's value, if it ran.
    pub fn passed(self) -> Option<R> {
        match self {
            Self::Passed(value) => Some(value),
            Self::Blocked(_) => None,
        }
    }

    /// The blocking result, if the operation did not run.
    pub fn blocked(self) -> Option<ValidatorResult> {
        match self {
            Self::Passed(_) => None,
            Self::Blocked(result) => Some(result),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Gated<U> {
        match self {
            Self::Passed(value) => Gated::Passed(f(value)),
            Self::Blocked(result) => Gated::Blocked(result),
        }
    }

    /// Converts into a `Result` with the blocking result as the error.
    ///
    /// # Errors
    ///
    /// The [`ValidatorResult`] that blocked the operation.
    pub fn into_result(self) -> Result<R, ValidatorResult> {
        match self {
            Self::Passed(value) => Ok(value),
            Self::Blocked(result) => Err(result),
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Starts a gate over the rules of validator `V`.
pub fn gate<V: Registered>(selection: impl Into<RuleSelection>) -> GateBuilder<V> {
    GateBuilder {
        selection: selection.into(),
        mode: Mode::default(),
        _validator: PhantomData,
    }
}

/// A gate without a subject yet.
///
/// The subject selector is mandatory: the gate never guesses which argument
/// to validate.
pub struct GateBuilder<V> {
    selection: RuleSelection,
    mode: Mode,
    _validator: PhantomData<fn() -> V>,
}

impl<V: Registered> GateBuilder<V> {
    /// Builds the selection and mode from a configuration.
    #[must_use]
    pub fn from_config(config: &GateConfig) -> Self {
        gate::<V>(config.selection()).mode(config.mode)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Chooses the value validated from the operation's arguments.
    pub fn subject<A, S>(self, selector: S) -> SubjectGate<V, A, S>
    where
        S: Fn(&A) -> &V::Input,
    {
        SubjectGate {
            selection: self.selection,
            mode: self.mode,
            selector,
            _marker: PhantomData,
        }
    }
}

/// A gate with a subject, waiting for its operation.
pub struct SubjectGate<V, A, S> {
    selection: RuleSelection,
    mode: Mode,
    selector: S,
    _marker: PhantomData<fn(&A) -> V>,
}

impl<V, A, S> SubjectGate<V, A, S>
where
    V: Registered,
    S: Fn(&A) -> &V::Input,
{
    /// Sets the guarded operation. It receives the owner and the arguments.
    pub fn guard<O, R, F>(self, operation: F) -> Gate<V, A, S, F>
    where
        F: Fn(&O, A) -> R,
    {
        Gate {
            selection: self.selection,
            mode: self.mode,
            selector: self.selector,
            operation,
            _marker: PhantomData,
        }
    }
}

// ============================================================================
// GATE
// ============================================================================

/// An operation guarded by the rules of validator `V`.
pub struct Gate<V, A, S, F> {
    selection: RuleSelection,
    mode: Mode,
    selector: S,
    operation: F,
    _marker: PhantomData<fn(&A) -> V>,
}

impl<V, A, S, F> Gate<V, A, S, F>
where
    V: Registered,
    S: Fn(&A) -> &V::Input,
{
    #[must_use]
    pub fn selection(&self) -> &RuleSelection {
        &self.selection
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Validates the selected argument, then runs the operation if it passed.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::AdapterNotFound`] if `owner` neither is nor provides
    /// a `V`; otherwise the errors of [`RulesExt::accept`].
    pub fn call<O, R>(&self, owner: &O, args: A) -> Result<Gated<R>, ValidatorError>
    where
        O: Adapter + 'static,
        F: Fn(&O, A) -> R,
    {
        let validator = adapt::<V, O>(owner).ok_or_else(ValidatorError::adapter_not_found::<V>)?;
        let result = validator.accept(&self.selection, self.mode, (self.selector)(&args))?;

        if result.is_ok() {
            Ok(Gated::Passed((self.operation)(owner, args)))
        } else {
            debug!(
                validator = validator.name(),
                owner = std::any::type_name::<O>(),
                "operation blocked"
            );
            Ok(Gated::Blocked(result))
        }
    }
}

impl<V, A, S, F> fmt::Debug for Gate<V, A, S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("validator", &std::any::type_name::<V>())
            .field("selection", &self.selection)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Outcome, Validate};
    use crate::registry::Registrar;
    use pretty_assertions::assert_eq;
    use std::any::{Any, TypeId};
    use std::cell::Cell;

    struct Bounds;

    impl Bounds {
        fn positive(&self, n: &i64) -> Outcome {
            if *n > 0 {
                Ok(ValidatorResult::ok())
            } else {
                ValidatorResult::error("not positive")
            }
        }

        fn small(&self, n: &i64) -> Outcome {
            if *n < 100 {
                Ok(ValidatorResult::ok())
            } else {
                ValidatorResult::warning("large value")
            }
        }
    }

    impl Validate for Bounds {
        type Input = i64;

        fn validate(&self, input: &i64) -> Outcome {
            self.positive(input)
        }
    }

    impl Registered for Bounds {
        fn register_rules(rules: &mut Registrar<Self>) {
            rules
                .register(["positive"], "positive", Self::positive)
                .register(["small"], "small", Self::small);
        }
    }

    impl Adapter for Bounds {}

    struct Ledger {
        bounds: Bounds,
        calls: Cell<usize>,
    }

    impl Ledger {
        fn new() -> Self {
            Self {
                bounds: Bounds,
                calls: Cell::new(0),
            }
        }

        fn add(&self, amount: (i64, &'static str)) -> String {
            self.calls.set(self.calls.get() + 1);
            format!("{} {}", amount.0, amount.1)
        }
    }

    impl Adapter for Ledger {
        fn adapt_any(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
            (capability == TypeId::of::<Bounds>()).then_some(&self.bounds as &(dyn Any + 'static))
        }
    }

    struct Orphan;

    impl Adapter for Orphan {}

    fn amount<'a>(args: &'a (i64, &'static str)) -> &'a i64 {
        &args.0
    }

    #[test]
    fn passing_rules_run_the_operation() {
        let ledger = Ledger::new();
        let add = gate::<Bounds>(["positive"])
            .subject(amount)
            .guard(|ledger: &Ledger, args: (i64, &'static str)| ledger.add(args));

        let outcome = add.call(&ledger, (5, "EUR")).unwrap();
        assert_eq!(outcome.passed().as_deref(), Some("5 EUR"));
        assert_eq!(ledger.calls.get(), 1);
    }

    #[test]
    fn failing_rule_blocks_the_operation() {
        let ledger = Ledger::new();
        let add = gate::<Bounds>(["positive"])
            .subject(amount)
            .guard(|ledger: &Ledger, args: (i64, &'static str)| ledger.add(args));

        let outcome = add.call(&ledger, (-5, "EUR")).unwrap();
        let result = outcome.blocked().unwrap();
        assert_eq!(result.message(), Some("not positive"));
        assert_eq!(result.rule(), Some("positive"));
        assert_eq!(ledger.calls.get(), 0);
    }

    #[test]
    fn warning_also_blocks() {
        let ledger = Ledger::new();
        let add = gate::<Bounds>(RuleSelection::All)
            .subject(amount)
            .guard(|ledger: &Ledger, args: (i64, &'static str)| ledger.add(args));

        assert!(add.call(&ledger, (500, "EUR")).unwrap().is_blocked());
        assert_eq!(ledger.calls.get(), 0);
    }

    #[test]
    fn any_mode_needs_one_passing_rule() {
        let ledger = Ledger::new();
        let add = gate::<Bounds>(["positive", "small"])
            .mode(Mode::Any)
            .subject(amount)
            .guard(|ledger: &Ledger, args: (i64, &'static str)| ledger.add(args));

        assert!(add.call(&ledger, (-5, "EUR")).unwrap().is_passed());
        assert!(add.call(&ledger, (500, "EUR")).unwrap().is_passed());
    }

    #[test]
    fn validator_can_own_the_operation() {
        let double = gate::<Bounds>(["positive"])
            .subject(|n: &i64| n)
            .guard(|_: &Bounds, n: i64| n * 2);

        assert_eq!(double.call(&Bounds, 21).unwrap(), Gated::Passed(42));
        assert!(double.call(&Bounds, -1).unwrap().is_blocked());
    }

    #[test]
    fn owner_without_validator_is_a_contract_failure() {
        let noop = gate::<Bounds>(RuleSelection::All)
            .subject(|n: &i64| n)
            .guard(|_: &Orphan, n: i64| n);

        let err = noop.call(&Orphan, 1).unwrap_err();
        assert_eq!(err.code(), "adapter_not_found");
    }

    #[test]
    fn unknown_rule_surfaces_before_the_operation() {
        let noop = gate::<Bounds>(["missing"])
            .subject(|n: &i64| n)
            .guard(|_: &Bounds, _: i64| -> i64 { unreachable!() });

        let err = noop.call(&Bounds, 1).unwrap_err();
        assert_eq!(err.code(), "unknown_rule");
    }

    #[test]
    fn configured_gate() {
        let config = GateConfig::from_json(r#"{"rules": ["small"], "mode": "any"}"#).unwrap();
        let noop = GateBuilder::<Bounds>::from_config(&config)
            .subject(|n: &i64| n)
            .guard(|_: &Bounds, n: i64| n);

        assert_eq!(noop.mode(), Mode::Any);
        assert_eq!(noop.selection(), &RuleSelection::only(["small"]));
        assert!(noop.call(&Bounds, -3).unwrap().is_passed());
    }

    #[test]
    fn gated_conversions() {
        let passed: Gated<u8> = Gated::Passed(1);
        assert_eq!(passed.clone().map(u32::from), Gated::Passed(1u32));
        assert_eq!(passed.into_result(), Ok(1));

        let result = ValidatorResult::error("no").unwrap();
        let blocked: Gated<u8> = Gated::Blocked(result.clone());
        assert_eq!(blocked.into_result(), Err(result));
    }
}
