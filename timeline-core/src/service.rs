//! Timeline operations with referential integrity.
//!
//! Every operation is one read-modify-write cycle against a single timeline
//! document. Rules enforced here:
//! - event type names are unique within a timeline
//! - renaming an event type retags every event using the old name
//! - an event type can't be deleted while events still use it
//!
//! Events are not checked against the timeline's event types when created or
//! updated; an event may carry a type name that isn't defined (yet).

use tracing::{info, warn};

use crate::error::{EntityKind, TimelineError, TimelineResult};
use crate::event::{Event, EventDraft};
use crate::event_type::{self, EventType, EventTypeDraft};
use crate::store::TimelineStore;
use crate::timeline::{Timeline, TimelineDraft, TimelineImport, TimelinePatch};

pub struct TimelineService {
    store: TimelineStore,
}

impl TimelineService {
    pub fn new(store: TimelineStore) -> Self {
        TimelineService { store }
    }

    pub fn store(&self) -> &TimelineStore {
        &self.store
    }

    fn require_timeline(&self, id: &str) -> TimelineResult<Timeline> {
        self.store
            .load(id)?
            .ok_or_else(|| TimelineError::not_found(EntityKind::Timeline, id))
    }

    // TIMELINES:

    pub fn list_timelines(&self) -> TimelineResult<Vec<Timeline>> {
        self.store.list()
    }

    pub fn get_timeline(&self, id: &str) -> TimelineResult<Timeline> {
        self.require_timeline(id)
    }

    pub fn create_timeline(&self, draft: TimelineDraft) -> TimelineResult<Timeline> {
        let timeline = Timeline::new(draft)?;
        self.store.save(&timeline)?;

        info!(id = %timeline.id, name = %timeline.name, "created timeline");
        Ok(timeline)
    }

    /// Create a new timeline from an exported document, under a fresh id.
    pub fn import_timeline(&self, import: TimelineImport) -> TimelineResult<Timeline> {
        let timeline = import.into_timeline()?;
        self.store.save(&timeline)?;

        info!(
            id = %timeline.id,
            event_types = timeline.event_types.len(),
            events = timeline.events.len(),
            "imported timeline"
        );
        Ok(timeline)
    }

    pub fn update_timeline(&self, id: &str, patch: TimelinePatch) -> TimelineResult<Timeline> {
        let mut timeline = self.require_timeline(id)?;
        timeline.apply(patch)?;
        self.store.save(&timeline)?;

        info!(id, "updated timeline");
        Ok(timeline)
    }

    pub fn delete_timeline(&self, id: &str) -> TimelineResult<()> {
        if !self.store.delete(id)? {
            return Err(TimelineError::not_found(EntityKind::Timeline, id));
        }

        info!(id, "deleted timeline");
        Ok(())
    }

    // EVENTS:

    pub fn create_event(&self, timeline_id: &str, draft: EventDraft) -> TimelineResult<Event> {
        let mut timeline = self.require_timeline(timeline_id)?;

        let event = Event::new(draft);
        timeline.events.push(event.clone());
        self.store.save(&timeline)?;

        info!(timeline_id, event_id = %event.id, kind = %event.kind, "created event");
        Ok(event)
    }

    pub fn update_event(
        &self,
        timeline_id: &str,
        event_id: &str,
        draft: EventDraft,
    ) -> TimelineResult<Event> {
        let mut timeline = self.require_timeline(timeline_id)?;

        let event = timeline
            .event_mut(event_id)
            .ok_or_else(|| TimelineError::not_found(EntityKind::Event, event_id))?;
        event.apply(draft);
        let event = event.clone();

        self.store.save(&timeline)?;

        info!(timeline_id, event_id, "updated event");
        Ok(event)
    }

    /// Remove an event. Unknown event ids are a no-op.
    pub fn delete_event(&self, timeline_id: &str, event_id: &str) -> TimelineResult<()> {
        let mut timeline = self.require_timeline(timeline_id)?;

        let removed = timeline.remove_event(event_id);
        self.store.save(&timeline)?;

        info!(timeline_id, event_id, removed, "deleted event");
        Ok(())
    }

    // EVENT TYPES:

    pub fn create_event_type(
        &self,
        timeline_id: &str,
        draft: EventTypeDraft,
    ) -> TimelineResult<EventType> {
        let mut timeline = self.require_timeline(timeline_id)?;

        let event_type = EventType::try_from(draft)?;
        if timeline.has_event_type(&event_type.name) {
            warn!(timeline_id, name = %event_type.name, "duplicate event type rejected");
            return Err(TimelineError::DuplicateEventType(event_type.name));
        }

        timeline.event_types.push(event_type.clone());
        self.store.save(&timeline)?;

        info!(timeline_id, name = %event_type.name, "created event type");
        Ok(event_type)
    }

    /// Replace an event type's name and color, retagging events on rename.
    ///
    /// The retag and the type change land in the same document write.
    pub fn update_event_type(
        &self,
        timeline_id: &str,
        old_name: &str,
        draft: EventTypeDraft,
    ) -> TimelineResult<EventType> {
        let mut timeline = self.require_timeline(timeline_id)?;

        if !timeline.has_event_type(old_name) {
            return Err(TimelineError::not_found(EntityKind::EventType, old_name));
        }

        event_type::validate_name(&draft.name)?;

        let renamed = draft.name != old_name;
        if renamed && timeline.has_event_type(&draft.name) {
            warn!(timeline_id, name = %draft.name, "event type rename collides");
            return Err(TimelineError::DuplicateEventType(draft.name));
        }

        let retagged = if renamed {
            timeline.retag_events(old_name, &draft.name)
        } else {
            0
        };

        let event_type = timeline
            .event_type_mut(old_name)
            .ok_or_else(|| TimelineError::not_found(EntityKind::EventType, old_name))?;
        event_type.name = draft.name;
        event_type.color = draft.color;
        let event_type = event_type.clone();

        self.store.save(&timeline)?;

        info!(
            timeline_id,
            old_name,
            new_name = %event_type.name,
            retagged,
            "updated event type"
        );
        Ok(event_type)
    }

    pub fn delete_event_type(&self, timeline_id: &str, name: &str) -> TimelineResult<()> {
        let mut timeline = self.require_timeline(timeline_id)?;

        if !timeline.has_event_type(name) {
            return Err(TimelineError::not_found(EntityKind::EventType, name));
        }

        let count = timeline.usage_count(name);
        if count > 0 {
            warn!(timeline_id, name, count, "event type still in use");
            return Err(TimelineError::EventTypeInUse {
                name: name.to_string(),
                count,
            });
        }

        timeline.event_types.retain(|et| et.name != name);
        self.store.save(&timeline)?;

        info!(timeline_id, name, "deleted event type");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_service() -> (TempDir, TimelineService) {
        let dir = TempDir::new().unwrap();
        let service = TimelineService::new(TimelineStore::new(dir.path()));
        (dir, service)
    }

    fn type_draft(name: &str, color: &str) -> EventTypeDraft {
        EventTypeDraft {
            name: name.to_string(),
            color: Some(color.to_string()),
        }
    }

    fn make_timeline_with_type(service: &TimelineService, name: &str) -> Timeline {
        let timeline = service.create_timeline(TimelineDraft::named("T")).unwrap();
        service
            .create_event_type(&timeline.id, type_draft(name, "#00F"))
            .unwrap();
        timeline
    }

    #[test]
    fn test_create_timeline_persists() {
        let (_dir, service) = make_service();
        let created = service
            .create_timeline(TimelineDraft {
                name: "Project".into(),
                description: Some("Milestones".into()),
            })
            .unwrap();

        assert_eq!(service.get_timeline(&created.id).unwrap(), created);
        assert_eq!(service.list_timelines().unwrap(), vec![created]);
    }

    #[test]
    fn test_create_timeline_rejects_empty_name() {
        let (_dir, service) = make_service();
        assert!(matches!(
            service.create_timeline(TimelineDraft::named("")),
            Err(TimelineError::Validation(_))
        ));
        assert!(service.list_timelines().unwrap().is_empty());
    }

    #[test]
    fn test_update_timeline_merges_fields() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "Meeting");

        let updated = service
            .update_timeline(
                &timeline.id,
                TimelinePatch {
                    name: None,
                    description: Some("Now described".into()),
                },
            )
            .unwrap();

        assert_eq!(updated.name, "T");
        assert_eq!(updated.description.as_deref(), Some("Now described"));
        assert_eq!(updated.created_at, timeline.created_at);
        assert_eq!(updated.event_types.len(), 1);
        assert_eq!(service.get_timeline(&timeline.id).unwrap(), updated);
    }

    #[test]
    fn test_missing_timeline_is_not_found_everywhere() {
        let (_dir, service) = make_service();
        let missing = "missing";

        let results = [
            service.get_timeline(missing).map(|_| ()),
            service
                .update_timeline(missing, TimelinePatch::default())
                .map(|_| ()),
            service.delete_timeline(missing),
            service
                .create_event(missing, EventDraft::of_type("A"))
                .map(|_| ()),
            service
                .update_event(missing, "e", EventDraft::of_type("A"))
                .map(|_| ()),
            service.delete_event(missing, "e"),
            service
                .create_event_type(missing, type_draft("A", "#000"))
                .map(|_| ()),
            service
                .update_event_type(missing, "A", type_draft("B", "#000"))
                .map(|_| ()),
            service.delete_event_type(missing, "A"),
        ];

        for result in results {
            assert!(matches!(
                result,
                Err(TimelineError::NotFound {
                    kind: EntityKind::Timeline,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_delete_timeline_removes_document() {
        let (_dir, service) = make_service();
        let timeline = service.create_timeline(TimelineDraft::named("T")).unwrap();

        service.delete_timeline(&timeline.id).unwrap();
        assert!(matches!(
            service.get_timeline(&timeline.id),
            Err(TimelineError::NotFound { .. })
        ));
    }

    #[test]
    fn test_event_lifecycle() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "Meeting");

        let first = service
            .create_event(&timeline.id, EventDraft::of_type("Meeting"))
            .unwrap();
        let second = service
            .create_event(&timeline.id, EventDraft::of_type("Meeting"))
            .unwrap();

        let updated = service
            .update_event(
                &timeline.id,
                &first.id,
                EventDraft {
                    kind: "Meeting".into(),
                    time: Some("2024-04-06".parse().unwrap()),
                    note: Some("Moved".into()),
                },
            )
            .unwrap();
        assert_eq!(updated.id, first.id);
        assert_eq!(updated.created_at, first.created_at);
        assert_eq!(updated.note.as_deref(), Some("Moved"));

        let stored = service.get_timeline(&timeline.id).unwrap();
        let ids: Vec<&str> = stored.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
        assert_eq!(stored.events[0], updated);

        service.delete_event(&timeline.id, &first.id).unwrap();
        let stored = service.get_timeline(&timeline.id).unwrap();
        assert_eq!(stored.events, vec![second]);
    }

    #[test]
    fn test_update_missing_event_is_not_found() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "Meeting");

        assert!(matches!(
            service.update_event(&timeline.id, "nope", EventDraft::of_type("Meeting")),
            Err(TimelineError::NotFound {
                kind: EntityKind::Event,
                ..
            })
        ));
    }

    #[test]
    fn test_delete_missing_event_is_noop() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "Meeting");

        service.delete_event(&timeline.id, "nope").unwrap();
        assert_eq!(
            service.get_timeline(&timeline.id).unwrap().event_types.len(),
            1
        );
    }

    #[test]
    fn test_events_may_reference_undefined_types() {
        let (_dir, service) = make_service();
        let timeline = service.create_timeline(TimelineDraft::named("T")).unwrap();

        let event = service
            .create_event(&timeline.id, EventDraft::of_type("Undefined"))
            .unwrap();
        assert_eq!(event.kind, "Undefined");
    }

    #[test]
    fn test_create_event_type_validation_and_conflict() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "Meeting");

        assert!(matches!(
            service.create_event_type(&timeline.id, type_draft("   ", "#000")),
            Err(TimelineError::Validation(_))
        ));
        assert!(matches!(
            service.create_event_type(&timeline.id, type_draft("Meeting", "#F00")),
            Err(TimelineError::DuplicateEventType(_))
        ));

        // Names are case-sensitive
        service
            .create_event_type(&timeline.id, type_draft("meeting", "#F00"))
            .unwrap();

        let names: Vec<String> = service
            .get_timeline(&timeline.id)
            .unwrap()
            .event_types
            .into_iter()
            .map(|et| et.name)
            .collect();
        assert_eq!(names, vec!["Meeting", "meeting"]);
    }

    #[test]
    fn test_rename_event_type_retags_events() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "A");
        service
            .create_event_type(&timeline.id, type_draft("Other", "#111"))
            .unwrap();
        for kind in ["A", "Other", "A"] {
            service
                .create_event(&timeline.id, EventDraft::of_type(kind))
                .unwrap();
        }

        let renamed = service
            .update_event_type(&timeline.id, "A", type_draft("B", "#0F0"))
            .unwrap();
        assert_eq!(renamed, EventType::new("B", Some("#0F0".into())).unwrap());

        let stored = service.get_timeline(&timeline.id).unwrap();
        assert_eq!(stored.usage_count("A"), 0);
        assert_eq!(stored.usage_count("B"), 2);
        assert_eq!(stored.usage_count("Other"), 1);
        assert!(!stored.has_event_type("A"));
        assert_eq!(stored.event_types[0].name, "B");
    }

    #[test]
    fn test_update_event_type_color_only() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "A");
        service
            .create_event(&timeline.id, EventDraft::of_type("A"))
            .unwrap();

        let updated = service
            .update_event_type(&timeline.id, "A", type_draft("A", "#FFF"))
            .unwrap();
        assert_eq!(updated.color.as_deref(), Some("#FFF"));
        assert_eq!(service.get_timeline(&timeline.id).unwrap().usage_count("A"), 1);
    }

    #[test]
    fn test_update_event_type_errors() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "A");
        service
            .create_event_type(&timeline.id, type_draft("B", "#000"))
            .unwrap();
        service
            .create_event(&timeline.id, EventDraft::of_type("A"))
            .unwrap();

        assert!(matches!(
            service.update_event_type(&timeline.id, "Nope", type_draft("C", "#000")),
            Err(TimelineError::NotFound {
                kind: EntityKind::EventType,
                ..
            })
        ));
        assert!(matches!(
            service.update_event_type(&timeline.id, "A", type_draft("B", "#000")),
            Err(TimelineError::DuplicateEventType(_))
        ));
        assert!(matches!(
            service.update_event_type(&timeline.id, "A", type_draft(" ", "#000")),
            Err(TimelineError::Validation(_))
        ));

        // Nothing was written by the failed attempts
        let stored = service.get_timeline(&timeline.id).unwrap();
        assert_eq!(stored.usage_count("A"), 1);
        assert_eq!(stored.event_types.len(), 2);
    }

    #[test]
    fn test_delete_event_type_in_use_guard() {
        let (_dir, service) = make_service();
        let timeline = make_timeline_with_type(&service, "Meeting");
        let event = service
            .create_event(&timeline.id, EventDraft::of_type("Meeting"))
            .unwrap();

        let err = service
            .delete_event_type(&timeline.id, "Meeting")
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(matches!(err, TimelineError::EventTypeInUse { count: 1, .. }));

        service.delete_event(&timeline.id, &event.id).unwrap();
        service.delete_event_type(&timeline.id, "Meeting").unwrap();
        assert!(service.get_timeline(&timeline.id).unwrap().event_types.is_empty());

        assert!(matches!(
            service.delete_event_type(&timeline.id, "Meeting"),
            Err(TimelineError::NotFound {
                kind: EntityKind::EventType,
                ..
            })
        ));
    }

    #[test]
    fn test_import_timeline_persists_new_document() {
        let (_dir, service) = make_service();
        let import: TimelineImport = serde_json::from_str(
            r#"{"name": "Imported", "event_types": [{"name": "A"}], "events": [{"type": "A"}]}"#,
        )
        .unwrap();

        let timeline = service.import_timeline(import).unwrap();
        assert_eq!(service.get_timeline(&timeline.id).unwrap(), timeline);
        assert_eq!(timeline.usage_count("A"), 1);
    }
}
