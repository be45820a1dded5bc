//! Core traits for the validation system
//!
//! This module defines the fundamental trait that all validators implement,
//! and the extension trait that composes them.

use std::sync::Arc;

use crate::chain::ValidatorChain;
use crate::foundation::{ValidatorError, ValidatorResult};

/// What every validation returns.
///
/// `Ok` carries the data-driven outcome (which may itself be a warning or an
/// error); `Err` is a contract failure that must propagate.
pub type Outcome = Result<ValidatorResult, ValidatorError>;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The capability "can validate a value of type `Input`".
///
/// Implementors decide which checks to run and how to combine them; the
/// trait imposes no combination policy.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_validator::foundation::{Outcome, Validate, ValidatorResult};
///
/// struct NotNegative;
///
/// impl Validate for NotNegative {
///     type Input = i64;
///
///     fn validate(&self, input: &i64) -> Outcome {
///         if *input < 0 {
///             ValidatorResult::error("age<0")
///         } else {
///             Ok(ValidatorResult::ok())
///         }
///     }
/// }
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str` and `[T]`.
    type Input: ?Sized + 'static;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Outcome;

    /// Returns the name of this validator.
    ///
    /// Used in logs and error messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        (**self).validate(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        (**self).validate(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        (**self).validate(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Extension trait providing composition methods for validators.
///
/// Automatically implemented for every `Send + Sync` validator.
pub trait ValidateExt: Validate + Sized + Send + Sync + 'static {
    /// Starts a chain with `self` followed by `next`.
    ///
    /// The chain stops at the first non-OK result.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let chain = NotNegative.then(BelowLimit(130));
    /// assert!(chain.validate(&5)?.is_ok());
    /// ```
    fn then<V>(self, next: V) -> ValidatorChain<Self::Input>
    where
        V: Validate<Input = Self::Input> + Send + Sync + 'static,
    {
        ValidatorChain::new().with(self).with(next)
    }

    /// Wraps `self` in a single-member chain.
    fn into_chain(self) -> ValidatorChain<Self::Input> {
        ValidatorChain::new().with(self)
    }
}

impl<T> ValidateExt for T where T: Validate + Send + Sync + 'static {}

// ============================================================================
// TESTS
// ============================================================================
