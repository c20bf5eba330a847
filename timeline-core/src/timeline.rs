//! Timelines: the top-level documents owning event types and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TimelineError, TimelineResult};
use crate::event::{Event, EventDraft};
use crate::event_type::EventType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub event_types: Vec<EventType>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Timeline {
    /// Create an empty timeline with a fresh id.
    pub fn new(draft: TimelineDraft) -> TimelineResult<Self> {
        validate_name(&draft.name)?;

        Ok(Timeline {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            created_at: Utc::now(),
            event_types: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Merge the supplied fields, leaving the others untouched.
    pub fn apply(&mut self, patch: TimelinePatch) -> TimelineResult<()> {
        if let Some(name) = patch.name {
            validate_name(&name)?;
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        Ok(())
    }

    // EVENT TYPES:

    pub fn event_type(&self, name: &str) -> Option<&EventType> {
        self.event_types.iter().find(|et| et.name == name)
    }

    pub fn event_type_mut(&mut self, name: &str) -> Option<&mut EventType> {
        self.event_types.iter_mut().find(|et| et.name == name)
    }

    pub fn has_event_type(&self, name: &str) -> bool {
        self.event_type(name).is_some()
    }

    /// Number of events currently tagged with `name`.
    pub fn usage_count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.has_type(name)).count()
    }

    /// Point every event tagged `old_name` at `new_name`. Returns how many changed.
    pub fn retag_events(&mut self, old_name: &str, new_name: &str) -> usize {
        let mut changed = 0;
        for event in self.events.iter_mut().filter(|e| e.has_type(old_name)) {
            event.kind = new_name.to_string();
            changed += 1;
        }
        changed
    }

    // EVENTS:

    pub fn event_mut(&mut self, id: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// Remove an event by id. Returns whether it was present.
    pub fn remove_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }
}

/// Request body for creating a timeline
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TimelineDraft {
    pub fn named(name: impl Into<String>) -> Self {
        TimelineDraft {
            name: name.into(),
            description: None,
        }
    }
}

/// Partial update of a timeline's own fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelinePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A previously exported timeline document
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineImport {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_types: Vec<EventType>,
    #[serde(default)]
    pub events: Vec<ImportedEvent>,
}

/// An event inside an imported document. Any `id` it carries is replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedEvent {
    #[serde(flatten)]
    pub draft: EventDraft,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TimelineImport {
    /// Build a new timeline from the imported document under a fresh id.
    pub fn into_timeline(self) -> TimelineResult<Timeline> {
        let mut timeline = Timeline::new(TimelineDraft {
            name: self.name,
            description: self.description,
        })?;

        for event_type in self.event_types {
            let event_type = EventType::new(event_type.name, event_type.color)?;
            if timeline.has_event_type(&event_type.name) {
                return Err(TimelineError::DuplicateEventType(event_type.name));
            }
            timeline.event_types.push(event_type);
        }

        timeline.events = self
            .events
            .into_iter()
            .map(|imported| {
                let mut event = Event::new(imported.draft);
                if imported.created_at.is_some() {
                    event.created_at = imported.created_at;
                }
                event
            })
            .collect();

        Ok(timeline)
    }
}

fn validate_name(name: &str) -> TimelineResult<()> {
    if name.trim().is_empty() {
        return Err(TimelineError::Validation(
            "Timeline name cannot be empty".into(),
        ));
    }
    Ok(())
}
