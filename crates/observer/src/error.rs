//! Errors raised by observable containers

use thiserror::Error;

/// Failure of an operation on an observable container.
///
/// The container is left unchanged and no event is sent when an operation
/// fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ObserverError {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("item not found")]
    NotFound,

    #[error("value has been taken")]
    Empty,

    /// A value could not be turned into an event payload.
    #[error("cannot serialize event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ObserverError {
    /// Stable identifier for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::NotFound => "not_found",
            Self::Empty => "empty",
            Self::Payload(_) => "payload",
        }
    }
}
