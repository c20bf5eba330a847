//! Events: single occurrences on a timeline, tagged with an event type name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event_time::EventTime;

/// An event on a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Name of an `EventType` in the same timeline, or empty when untyped
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub time: Option<EventTime>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Create an event with a fresh id, stamped with the current time.
    pub fn new(draft: EventDraft) -> Self {
        Event {
            id: Uuid::new_v4().to_string(),
            kind: draft.kind,
            time: draft.time,
            note: draft.note,
            created_at: Some(Utc::now()),
        }
    }

    /// Replace every field except the identity (`id`, `created_at`).
    pub fn apply(&mut self, draft: EventDraft) {
        self.kind = draft.kind;
        self.time = draft.time;
        self.note = draft.note;
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.kind == name
    }
}

/// Caller-supplied event fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDraft {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub time: Option<EventTime>,
    #[serde(default)]
    pub note: Option<String>,
}

impl EventDraft {
    pub fn of_type(kind: impl Into<String>) -> Self {
        EventDraft {
            kind: kind.into(),
            ..Default::default()
        }
    }
}
