//! Error types for timeline operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Timeline,
    Event,
    EventType,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntityKind::Timeline => write!(f, "Timeline"),
            EntityKind::Event => write!(f, "Event"),
            EntityKind::EventType => write!(f, "Event type"),
        }
    }
}

/// Errors that can occur in timeline operations.
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Event type '{0}' already exists")]
    DuplicateEventType(String),

    #[error("Cannot delete event type '{name}': used by {count} event(s)")]
    EventTypeInUse { name: String, count: usize },

    #[error("Corrupt timeline document {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TimelineError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        TimelineError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Duplicate names and in-use deletes both reject the request as a conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            TimelineError::DuplicateEventType(_) | TimelineError::EventTypeInUse { .. }
        )
    }
}

/// Result type alias for timeline operations.
pub type TimelineResult<T> = Result<T, TimelineError>;
