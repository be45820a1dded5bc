//! Integration tests for observable containers through the public API.

use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde::Serialize;
use warden_observer::{Event, EventType, ObservableList, ObservedValue, Observer};

#[derive(Debug, Clone, PartialEq, Serialize)]
struct User {
    id: u64,
    name: String,
}

/// Keeps a printable trail of everything it sees.
#[derive(Default)]
struct AuditTrail {
    lines: Mutex<Vec<String>>,
}

impl Observer for AuditTrail {
    fn update(&self, event: &Event) {
        self.lines.lock().push(event.to_string());
    }
}

fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

#[test]
fn user_list_audit_trail() {
    let trail = Arc::new(AuditTrail::default());
    let mut users = ObservableList::new();
    users.observable().attach(EventType::Add, trail.clone());
    users.observable().attach(EventType::Delete, trail.clone());

    users.push(user(1, "alice")).unwrap();
    users.push(user(2, "bob")).unwrap();
    users.get(0).unwrap();
    users.delete(0).unwrap();

    assert_eq!(
        *trail.lines.lock(),
        vec![
            r#"add append {"item":{"id":1,"name":"alice"}}"#.to_string(),
            r#"add append {"item":{"id":2,"name":"bob"}}"#.to_string(),
            r#"delete delitem {"index":0,"item":{"id":1,"name":"alice"}}"#.to_string(),
        ]
    );
    assert_eq!(users.into_vec(), vec![user(2, "bob")]);
}

#[test]
fn detached_observer_stops_receiving() {
    let trail: Arc<dyn Observer> = Arc::new(AuditTrail::default());
    let counter = Arc::new(AuditTrail::default());
    let mut counter_value = ObservedValue::new("counter", 0u32);
    counter_value.observable().attach(EventType::Update, Arc::clone(&trail));
    counter_value.observable().attach(EventType::Update, counter.clone());

    counter_value.set(1).unwrap();
    assert!(counter_value.observable().detach(EventType::Update, &trail));
    counter_value.set(2).unwrap();

    assert_eq!(
        *counter.lines.lock(),
        vec![
            r#"update counter {"new_value":1,"old_value":0}"#.to_string(),
            r#"update counter {"new_value":2,"old_value":1}"#.to_string(),
        ]
    );
    assert_eq!(counter_value.observable().observer_count(EventType::Update), 1);
}
