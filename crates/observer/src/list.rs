//! A list that reports every access and change

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::event::{Event, EventType};
use crate::observable::Observable;
use crate::ObserverError;

/// A `Vec<T>` whose operations notify observers.
///
/// | operation | event | key | payload |
/// |-----------|-------|-----|---------|
/// | [`push`](Self::push) | `Add` | `append` | `item` |
/// | [`remove`](Self::remove) | `Remove` | `remove` | `item` |
/// | [`get`](Self::get) | `Get` | `getitem` | `index`, `item` |
/// | [`set`](Self::set) | `Update` | `setitem` | `index`, `old_value`, `new_value` |
/// | [`delete`](Self::delete) | `Delete` | `delitem` | `index`, `item` |
///
/// Iteration and length do not notify. A failed operation leaves the list
/// unchanged and sends nothing.
pub struct ObservableList<T> {
    items: Vec<T>,
    observable: Observable,
}

impl<T: Serialize> ObservableList<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            observable: Observable::new(),
        }
    }

    /// Where observers are attached.
    pub fn observable(&self) -> &Observable {
        &self.observable
    }

    pub fn push(&mut self, item: T) -> Result<(), ObserverError> {
        let event = Event::new(EventType::Add, "append").with("item", &item)?;
        self.items.push(item);
        self.observable.notify(&event);
        Ok(())
    }

    /// Removes the first item equal to `item`.
    pub fn remove(&mut self, item: &T) -> Result<T, ObserverError>
    where
        T: PartialEq,
    {
        let index = self
            .items
            .iter()
            .position(|candidate| candidate == item)
            .ok_or(ObserverError::NotFound)?;
        let event = Event::new(EventType::Remove, "remove").with("item", item)?;
        let removed = self.items.remove(index);
        self.observable.notify(&event);
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Result<&T, ObserverError> {
        let item = self.checked(index)?;
        let event = Event::new(EventType::Get, "getitem")
            .with("index", &index)?
            .with("item", item)?;
        self.observable.notify(&event);
        Ok(item)
    }

    /// Replaces the item at `index` and returns the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, ObserverError> {
        let old = self.checked(index)?;
        let event = Event::new(EventType::Update, "setitem")
            .with("index", &index)?
            .with("old_value", old)?
            .with("new_value", &value)?;
        let old = std::mem::replace(&mut self.items[index], value);
        self.observable.notify(&event);
        Ok(old)
    }

    /// Removes and returns the item at `index`.
    pub fn delete(&mut self, index: usize) -> Result<T, ObserverError> {
        let item = self.checked(index)?;
        let event = Event::new(EventType::Delete, "delitem")
            .with("index", &index)?
            .with("item", item)?;
        let item = self.items.remove(index);
        self.observable.notify(&event);
        Ok(item)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn checked(&self, index: usize) -> Result<&T, ObserverError> {
        self.items.get(index).ok_or(ObserverError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }
}

impl<T: Serialize> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> From<Vec<T>> for ObservableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

/// Read-only slice access. Reads through the slice do not notify.
impl<T> Deref for ObservableList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a ObservableList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Observer;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
    }

    impl Observer for Recorder {
        fn update(&self, event: &Event) {
            self.events.lock().push(event.clone());
        }
    }

    fn observed(items: Vec<i32>) -> (ObservableList<i32>, Arc<Recorder>) {
        let list = ObservableList::from(items);
        let recorder = Arc::new(Recorder::default());
        for event_type in EventType::ALL {
            list.observable().attach(event_type, recorder.clone());
        }
        (list, recorder)
    }

    #[test]
    fn push_reports_append() {
        let (mut list, recorder) = observed(vec![]);
        list.push(7).unwrap();

        let events = recorder.events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), EventType::Add);
        assert_eq!(events[0].key(), "append");
        assert_eq!(events[0].get("item"), Some(&json!(7)));
        assert_eq!(&*list, &[7]);
    }

    #[test]
    fn set_reports_old_and_new() {
        let (mut list, recorder) = observed(vec![1, 2]);
        assert_eq!(list.set(0, 5).unwrap(), 1);

        let events = recorder.events.lock();
        assert_eq!(events[0].key(), "setitem");
        assert_eq!(
            serde_json::Value::Object(events[0].data().clone()),
            json!({ "index": 0, "old_value": 1, "new_value": 5 })
        );
    }

    #[test]
    fn operations_report_in_order() {
        let (mut list, recorder) = observed(vec![1, 2, 3]);
        list.get(1).unwrap();
        list.remove(&3).unwrap();
        list.delete(0).unwrap();
        list.push(9).unwrap();

        let keys: Vec<_> = recorder
            .events
            .lock()
            .iter()
            .map(|event| event.key().to_string())
            .collect();
        assert_eq!(keys, vec!["getitem", "remove", "delitem", "append"]);
        assert_eq!(list.into_vec(), vec![2, 9]);
    }

    #[rstest]
    #[case::get(|list: &mut ObservableList<i32>| list.get(4).map(|_| ()))]
    #[case::set(|list: &mut ObservableList<i32>| list.set(4, 0).map(|_| ()))]
    #[case::delete(|list: &mut ObservableList<i32>| list.delete(4).map(|_| ()))]
    fn out_of_range_is_silent(#[case] op: fn(&mut ObservableList<i32>) -> Result<(), ObserverError>) {
        let (mut list, recorder) = observed(vec![1]);
        let err = op(&mut list).unwrap_err();
        assert_eq!(err.code(), "index_out_of_range");
        assert!(recorder.events.lock().is_empty());
        assert_eq!(&*list, &[1]);
    }

    #[test]
    fn removing_missing_item_fails() {
        let (mut list, recorder) = observed(vec![1]);
        assert_eq!(list.remove(&2).unwrap_err().code(), "not_found");
        assert!(recorder.events.lock().is_empty());
    }

    #[test]
    fn iteration_is_silent() {
        let (list, recorder) = observed(vec![1, 2, 3]);
        let sum: i32 = list.iter().sum();
        let count = (&list).into_iter().count();
        assert_eq!((sum, count, list.len()), (6, 3, 3));
        assert!(recorder.events.lock().is_empty());
    }
}
