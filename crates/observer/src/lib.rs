//! # warden-observer
//!
//! Observable containers that notify attached observers of every access and
//! change, with a typed event and a JSON payload.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden_observer::{Event, EventType, ObservableList, Observer};
//!
//! struct Audit;
//!
//! impl Observer for Audit {
//!     fn update(&self, event: &Event) {
//!         println!("{event}");
//!     }
//! }
//!
//! let mut users = ObservableList::new();
//! users.observable().attach(EventType::Add, Arc::new(Audit));
//! users.push("alice")?; // prints: add append {"item":"alice"}
//! ```

mod error;
pub mod event;
pub mod list;
pub mod observable;
pub mod value;

pub use error::ObserverError;
pub use event::{Event, EventType};
pub use list::ObservableList;
pub use observable::{Observable, Observer};
pub use value::ObservedValue;
