//! # warden-validator
//!
//! Rule-based validation of domain objects, with operations guarded by the
//! rules that apply to them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warden_validator::prelude::*;
//!
//! struct UserValidator;
//!
//! impl Validate for UserValidator {
//!     type Input = User;
//!
//!     fn validate(&self, user: &User) -> Outcome {
//!         match user.age {
//!             Some(age) if age >= 18 => Ok(ValidatorResult::ok()),
//!             _ => ValidatorResult::error("user must be at least 18"),
//!         }
//!     }
//! }
//!
//! impl Registered for UserValidator {
//!     fn register_rules(rules: &mut Registrar<Self>) {
//!         rules
//!             .register(["R001", "R003"], "check_email", Self::check_email)
//!             .register(["R002"], "check_name", Self::check_name);
//!     }
//! }
//!
//! let result = UserValidator.accept(&["R002"].into(), Mode::All, &user)?;
//! ```
//!
//! ## Building blocks
//!
//! - [`foundation`]: [`Validate`](foundation::Validate), the
//!   [`ValidatorResult`](foundation::ValidatorResult) outcome and
//!   [`ValidatorError`](foundation::ValidatorError)
//! - [`registry`]: named rules per validator type, registered once
//! - [`rules`]: running a selection of rules in [`Mode::All`](rules::Mode) or
//!   [`Mode::Any`](rules::Mode)
//! - [`chain`]: ordered validator chains with an optional success callback
//! - [`gate`]: operations that only run when their rules pass
//! - [`adapter`]: finding a validator on the object that owns an operation
//! - [`service`]: components owning a validator
//! - [`config`]: gate configuration from JSON

pub mod adapter;
pub mod chain;
pub mod config;
pub mod foundation;
pub mod gate;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod service;
