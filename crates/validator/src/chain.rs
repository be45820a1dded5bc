//! Ordered validator chains
//!
//! A [`ValidatorChain`] runs its members in construction order against the
//! same subject and returns the first non-OK result. When every member passes,
//! an optional callback sees the subject; if it rejects, the chain returns
//! [`ValidatorResult::callback_rejected`].
//!
//! A chain is itself a [`Validate`], so chains nest.
//!
//! ```rust,ignore
//! use warden_validator::chain::ChainBuilder;
//!
//! let chain = ChainBuilder::<i32>::new()
//!     .check(|n| *n != 0, "value is zero")
//!     .check(|n| *n > 0, "value<0")
//!     .check(|n| *n < 10, "error: value>10")
//!     .build()?;
//!
//! assert!(chain.validate(&5)?.is_ok());
//! assert_eq!(chain.validate(&15)?.message(), Some("error: value>10"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::foundation::{Outcome, Validate, ValidatorError, ValidatorResult};
use crate::rules::trace_result;

type Member<T> = Box<dyn Validate<Input = T> + Send + Sync>;
type Callback<T> = Box<dyn Fn(&T, &ValidatorResult) -> bool + Send + Sync>;

// ============================================================================
// VALIDATOR CHAIN
// ============================================================================

/// Validators evaluated in order with short-circuit on the first non-OK
/// result.
pub struct ValidatorChain<T: ?Sized + 'static> {
    members: Vec<Member<T>>,
    callback: Option<Callback<T>>,
}

impl<T: ?Sized + 'static> ValidatorChain<T> {
    /// An empty chain. It passes every subject.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            callback: None,
        }
    }

    /// Appends a member.
    #[must_use = "builder methods must be chained or built"]
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validate<Input = T> + Send + Sync + 'static,
    {
        self.members.push(Box::new(validator));
        self
    }

    /// Appends a member in place.
    pub fn push<V>(&mut self, validator: V)
    where
        V: Validate<Input = T> + Send + Sync + 'static,
    {
        self.members.push(Box::new(validator));
    }

    /// Sets the callback invoked once every member has passed.
    ///
    /// Returning `false` turns the outcome into
    /// [`ValidatorResult::callback_rejected`].
    #[must_use = "builder methods must be chained or built"]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T, &ValidatorResult) -> bool + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<T: ?Sized + 'static> Default for ValidatorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> fmt::Debug for ValidatorChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field(
                "members",
                &self.members.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl<T: ?Sized + 'static> Validate for ValidatorChain<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Outcome {
        for (index, member) in self.members.iter().enumerate() {
            let result = member.validate(input)?;
            if !result.is_ok() {
                debug!(index, member = member.name(), "chain stopped");
                trace_result(member.name(), &result);
                return Ok(result);
            }
        }

        let result = ValidatorResult::ok();
        if let Some(callback) = &self.callback
            && !callback(input, &result)
        {
            let rejected = ValidatorResult::callback_rejected();
            trace_result(self.name(), &rejected);
            return Ok(rejected);
        }
        Ok(result)
    }
}

// ============================================================================
// PREDICATE STEP
// ============================================================================

/// A chain step built from a predicate: `error(message)` when it returns
/// false.
pub struct Check<T: ?Sized, F> {
    predicate: F,
    message: Cow<'static, str>,
    _input: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F> Check<T, F>
where
    F: Fn(&T) -> bool,
{
    /// # Errors
    ///
    /// [`ValidatorError::InvalidArgument`] if `message` is empty.
    pub fn new(predicate: F, message: impl Into<Cow<'static, str>>) -> Result<Self, ValidatorError> {
        let message = message.into();
        if message.is_empty() {
            return Err(ValidatorError::invalid_argument(
                "a chain check requires a non-empty message",
            ));
        }
        Ok(Self {
            predicate,
            message,
            _input: PhantomData,
        })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<T, F> Validate for Check<T, F>
where
    T: ?Sized + 'static,
    F: Fn(&T) -> bool,
{
    type Input = T;

    fn validate(&self, input: &T) -> Outcome {
        if (self.predicate)(input) {
            Ok(ValidatorResult::ok())
        } else {
            ValidatorResult::error(self.message.clone())
        }
    }

    fn name(&self) -> &str {
        &self.message
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Assembles a [`ValidatorChain`] from predicates and validators.
///
/// Message checks are deferred to [`build`](Self::build) so steps can be
/// chained fluently.
pub struct ChainBuilder<T: ?Sized + 'static> {
    chain: ValidatorChain<T>,
    error: Option<ValidatorError>,
}

impl<T: ?Sized + 'static> ChainBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: ValidatorChain::new(),
            error: None,
        }
    }

    /// Adds a predicate step failing with `message`.
    #[must_use = "builder methods must be chained or built"]
    pub fn check<F>(mut self, predicate: F, message: impl Into<Cow<'static, str>>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        match Check::new(predicate, message) {
            Ok(check) => self.chain.push(check),
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    /// Adds a validator step.
    #[must_use = "builder methods must be chained or built"]
    pub fn validator<V>(mut self, validator: V) -> Self
    where
        V: Validate<Input = T> + Send + Sync + 'static,
    {
        self.chain.push(validator);
        self
    }

    /// Sets the callback run after every step has passed.
    #[must_use = "builder methods must be chained or built"]
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T, &ValidatorResult) -> bool + Send + Sync + 'static,
    {
        self.chain = self.chain.with_callback(callback);
        self
    }

    /// # Errors
    ///
    /// The first [`ValidatorError::InvalidArgument`] raised by a step.
    pub fn build(self) -> Result<ValidatorChain<T>, ValidatorError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.chain),
        }
    }
}

impl<T: ?Sized + 'static> Default for ChainBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
