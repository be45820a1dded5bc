//! Observer registration and dispatch

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::event::{Event, EventType};

/// Receives events from the [`Observable`]s it is attached to.
///
/// # Example
///
/// ```rust,ignore
/// use warden_observer::{Event, Observer};
///
/// struct ConsoleObserver;
///
/// impl Observer for ConsoleObserver {
///     fn update(&self, event: &Event) {
///         println!("[EVENT] {event}");
///     }
/// }
/// ```
pub trait Observer: Send + Sync {
    /// Called for every event of a type this observer is attached to.
    ///
    /// Runs synchronously inside the operation that fired the event.
    fn update(&self, event: &Event);
}

/// Observers attached per [`EventType`].
///
/// Attaching the same observer twice delivers each event to it twice.
#[derive(Default)]
pub struct Observable {
    observers: RwLock<HashMap<EventType, Vec<Arc<dyn Observer>>>>,
}

impl Observable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, event_type: EventType, observer: Arc<dyn Observer>) {
        self.observers
            .write()
            .entry(event_type)
            .or_default()
            .push(observer);
    }

    /// Removes the first attachment of `observer` (compared by identity).
    ///
    /// Returns `false` if it was not attached to `event_type`.
    pub fn detach(&self, event_type: EventType, observer: &Arc<dyn Observer>) -> bool {
        let mut observers = self.observers.write();
        let Some(list) = observers.get_mut(&event_type) else {
            return false;
        };
        match list.iter().position(|o| Arc::ptr_eq(o, observer)) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Delivers `event` to the observers of its type, in attachment order.
    ///
    /// The observer list is copied before dispatch, so observers may attach
    /// or detach while being notified.
    pub fn notify(&self, event: &Event) {
        let targets = self
            .observers
            .read()
            .get(&event.event_type())
            .cloned()
            .unwrap_or_default();

        trace!(
            event_type = %event.event_type(),
            key = event.key(),
            observers = targets.len(),
            "notify"
        );
        for observer in &targets {
            observer.update(event);
        }
    }

    /// Snapshot of the current attachments.
    pub fn observers(&self) -> HashMap<EventType, Vec<Arc<dyn Observer>>> {
        self.observers.read().clone()
    }

    pub fn observer_count(&self, event_type: EventType) -> usize {
        self.observers.read().get(&event_type).map_or(0, Vec::len)
    }
}

impl fmt::Debug for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observers = self.observers.read();
        let mut map = f.debug_map();
        for event_type in EventType::ALL {
            if let Some(list) = observers.get(&event_type) {
                map.entry(&event_type, &list.len());
            }
        }
        map.finish()
    }
}
