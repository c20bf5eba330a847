//! Named, colored categories that events reference by name.

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// An event type. Its `name` is its identity within a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub name: String,
    /// Free-form display color, e.g. `#3b82f6`
    #[serde(default)]
    pub color: Option<String>,
}

impl EventType {
    /// Build an event type, rejecting names that are empty after trimming.
    pub fn new(name: impl Into<String>, color: Option<String>) -> TimelineResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(EventType { name, color })
    }
}

/// Request body for creating or replacing an event type.
#[derive(Debug, Clone, Deserialize)]
pub struct EventTypeDraft {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl TryFrom<EventTypeDraft> for EventType {
    type Error = TimelineError;

    fn try_from(draft: EventTypeDraft) -> TimelineResult<Self> {
        EventType::new(draft.name, draft.color)
    }
}

pub(crate) fn validate_name(name: &str) -> TimelineResult<()> {
    if name.trim().is_empty() {
        return Err(TimelineError::Validation(
            "Event type name cannot be empty".into(),
        ));
    }
    Ok(())
}
