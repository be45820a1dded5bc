//! Prelude module for convenient imports.
//!
//! Provides a single `use warden_validator::prelude::*;` import that brings
//! in the traits and types needed to write, register and run validators.
//!
//! # Examples
//!
//! ```rust,ignore
//! use warden_validator::prelude::*;
//!
//! let chain = ChainBuilder::<i32>::new()
//!     .check(|n| *n > 0, "value<0")
//!     .check(|n| *n < 10, "error: value>10")
//!     .build()?;
//! ```

// ============================================================================
// FOUNDATION: Core traits, results, errors
// ============================================================================

pub use crate::foundation::{
    Outcome, Severity, Validate, ValidateExt, ValidatorError, ValidatorResult,
};

// ============================================================================
// RULES: Registration and evaluation
// ============================================================================

pub use crate::registry::{Registered, Registrar, register, rules_for};
pub use crate::rules::{Mode, RuleSelection, RulesExt};

// ============================================================================
// COMPOSITION: Chains, gates, adapters, services
// ============================================================================

pub use crate::adapter::{Adapter, adapt, adapt_first};
pub use crate::chain::{ChainBuilder, ValidatorChain};
pub use crate::config::GateConfig;
pub use crate::gate::{Gate, GateBuilder, Gated, gate};
pub use crate::service::Service;
