//! Change events
//!
//! An [`Event`] names what happened ([`EventType`]), which operation
//! produced it (`key`), and carries the values involved as a JSON object:
//!
//! ```json
//! { "event_type": "update", "key": "setitem",
//!   "data": { "index": 0, "old_value": 1, "new_value": 5 } }
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::ObserverError;

/// Kind of change an [`Event`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Get,
    Update,
    Delete,
    Add,
    Remove,
}

impl EventType {
    pub const ALL: [Self; 5] = [
        Self::Get,
        Self::Update,
        Self::Delete,
        Self::Add,
        Self::Remove,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable change notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    event_type: EventType,
    key: Cow<'static, str>,
    data: Map<String, Value>,
}

impl Event {
    pub fn new(event_type: EventType, key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            event_type,
            key: key.into(),
            data: Map::new(),
        }
    }

    /// Adds a named value to the payload.
    ///
    /// # Errors
    ///
    /// [`ObserverError::Payload`] if `value` cannot be represented as JSON.
    pub fn with<V: Serialize + ?Sized>(
        mut self,
        name: impl Into<String>,
        value: &V,
    ) -> Result<Self, ObserverError> {
        self.data.insert(name.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// The operation that produced the event, such as `"append"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.event_type, self.key)?;
        if !self.data.is_empty() {
            write!(f, " {}", Value::Object(self.data.clone()))?;
        }
        Ok(())
    }
}
