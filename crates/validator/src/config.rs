//! Gate configuration loaded from JSON
//!
//! ```json
//! { "rules": ["R001", "R002"], "mode": "any" }
//! ```
//!
//! Omitting `rules` (or setting it to `null`) selects every registered rule;
//! `mode` defaults to `all`.

use serde::{Deserialize, Serialize};

use crate::foundation::ValidatorError;
use crate::rules::{Mode, RuleSelection};

/// Rule selection and combination mode for a [`Gate`](crate::gate::Gate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Rule names to run; `None` runs all of them.
    #[serde(default)]
    pub rules: Option<Vec<String>>,

    #[serde(default)]
    pub mode: Mode,
}

impl GateConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::Config`] on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ValidatorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a configuration from a JSON value already in memory.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::Config`] if the value does not describe a gate.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidatorError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the configuration.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ValidatorError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn selection(&self) -> RuleSelection {
        RuleSelection::from(self.rules.clone())
    }
}
