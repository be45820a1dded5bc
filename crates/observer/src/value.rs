//! A single observed value

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::event::{Event, EventType};
use crate::observable::Observable;
use crate::ObserverError;

/// A named value that reports reads, writes and removal.
///
/// Events use the value's name as their key: `Get` carries `value`,
/// `Update` carries `old_value` and `new_value`, `Delete` carries `value`.
pub struct ObservedValue<T> {
    name: Cow<'static, str>,
    value: Option<T>,
    observable: Observable,
}

impl<T: Serialize> ObservedValue<T> {
    pub fn new(name: impl Into<Cow<'static, str>>, value: T) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            observable: Observable::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observable(&self) -> &Observable {
        &self.observable
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Reads the value.
    ///
    /// # Errors
    ///
    /// [`ObserverError::Empty`] after [`take`](Self::take).
    pub fn get(&self) -> Result<&T, ObserverError> {
        let value = self.value.as_ref().ok_or(ObserverError::Empty)?;
        let event = Event::new(EventType::Get, self.name.clone()).with("value", value)?;
        self.observable.notify(&event);
        Ok(value)
    }

    /// Stores `new_value`, returning the previous value if there was one.
    pub fn set(&mut self, new_value: T) -> Result<Option<T>, ObserverError> {
        let event = Event::new(EventType::Update, self.name.clone())
            .with("old_value", &self.value)?
            .with("new_value", &new_value)?;
        let old = self.value.replace(new_value);
        self.observable.notify(&event);
        Ok(old)
    }

    /// Removes the value.
    ///
    /// # Errors
    ///
    /// [`ObserverError::Empty`] if it was already taken.
    pub fn take(&mut self) -> Result<T, ObserverError> {
        let value = self.value.as_ref().ok_or(ObserverError::Empty)?;
        let event = Event::new(EventType::Delete, self.name.clone()).with("value", value)?;
        let value = self.value.take().ok_or(ObserverError::Empty)?;
        self.observable.notify(&event);
        Ok(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservedValue")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
