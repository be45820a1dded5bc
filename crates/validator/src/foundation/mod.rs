//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: `Validate`, `ValidateExt`
//! - **Outcomes**: `ValidatorResult`, `Severity`
//! - **Errors**: `ValidatorError`
//!
//! # Two failure channels
//!
//! A subject that breaks a rule is *not* an error in the Rust sense: the rule
//! returns `Ok(ValidatorResult)` with `Warning` or `Error` severity. Only
//! contract failures (an empty message, an unknown rule name, a rule that
//! gives up) travel through `Err(ValidatorError)`.
//!
//! ```rust,ignore
//! use warden_validator::foundation::{Outcome, Validate, ValidatorResult};
//!
//! struct Age;
//!
//! impl Validate for Age {
//!     type Input = i64;
//!
//!     fn validate(&self, input: &i64) -> Outcome {
//!         if *input < 0 {
//!             return ValidatorResult::error("age<0");
//!         }
//!         Ok(ValidatorResult::ok())
//!     }
//! }
//!
//! assert!(Age.validate(&-1)?.is_error());
//! assert!(Age.validate(&5)?.is_ok());
//! ```

// Module declarations
pub mod error;
pub mod result;
pub mod traits;

// Re-export everything at the foundation level for convenience
pub use error::{BoxError, ValidatorError};
pub use result::{CALLBACK_REJECTED_RULE, Severity, ValidatorResult};
pub use traits::{Outcome, Validate, ValidateExt};

// ============================================================================
// UTILITIES
// ============================================================================

/// Validates a value and returns the outcome.
///
/// This is a convenience function for one-off validations.
#[must_use = "validation result must be checked"]
pub fn validate_value<V>(value: &V::Input, validator: &V) -> Outcome
where
    V: Validate,
{
    validator.validate(value)
}

/// Validates a value with several validators and keeps every non-OK result.
///
/// Unlike a [`ValidatorChain`](crate::chain::ValidatorChain) this does not
/// short-circuit; it reports every failure in order.
pub fn validate_with_all<V>(
    value: &V::Input,
    validators: &[&V],
) -> Result<Vec<ValidatorResult>, ValidatorError>
where
    V: Validate + ?Sized,
{
    let mut failures = Vec::new();

    for validator in validators {
        let result = validator.validate(value)?;
        if !result.is_ok() {
            failures.push(result);
        }
    }

    Ok(failures)
}

// ============================================================================
// TESTS
// ============================================================================
