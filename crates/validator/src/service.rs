//! Services that own a validator
//!
//! A [`Service`] holds the validator for the subjects it handles, runs it
//! before acting, and exposes it to [`Gate`](crate::gate::Gate)s through
//! [`Adapter`].

use std::any::{Any, TypeId};

use tracing::debug;

use crate::adapter::Adapter;
use crate::foundation::{Validate, ValidatorError};
use crate::gate::Gated;
use crate::registry::Registered;
use crate::rules::{Mode, RuleSelection, RulesExt};

/// A component whose operations are guarded by its validator.
///
/// Implementors usually forward their [`Adapter`] mapping to
/// [`adapt_validator`](Self::adapt_validator):
///
/// ```rust,ignore
/// impl Adapter for UserService {
///     fn adapt_any(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
///         self.adapt_validator(capability)
///     }
/// }
/// ```
pub trait Service: Adapter {
    type Validator: Registered;

    fn validator(&self) -> &Self::Validator;

    /// Runs the validator's own check, then `action` if it passed.
    ///
    /// # Errors
    ///
    /// Contract failures raised by the validator.
    fn perform<R, F>(
        &self,
        subject: &<Self::Validator as Validate>::Input,
        action: F,
    ) -> Result<Gated<R>, ValidatorError>
    where
        F: FnOnce(&<Self::Validator as Validate>::Input) -> R,
    {
        let result = self.validator().validate(subject)?;
        if result.is_ok() {
            Ok(Gated::Passed(action(subject)))
        } else {
            debug!(service = std::any::type_name::<Self>(), %result, "action blocked");
            Ok(Gated::Blocked(result))
        }
    }

    /// Runs the selected registered rules, then `action` if they passed.
    ///
    /// # Errors
    ///
    /// Same as [`RulesExt::accept`].
    fn perform_with_rules<R, F>(
        &self,
        selection: &RuleSelection,
        mode: Mode,
        subject: &<Self::Validator as Validate>::Input,
        action: F,
    ) -> Result<Gated<R>, ValidatorError>
    where
        F: FnOnce(&<Self::Validator as Validate>::Input) -> R,
    {
        self.validator().apply(selection, mode, subject, action)
    }

    /// Provides the validator when it is the requested capability.
    fn adapt_validator(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
        (capability == TypeId::of::<Self::Validator>())
            .then(|| self.validator() as &(dyn Any + 'static))
    }
}
