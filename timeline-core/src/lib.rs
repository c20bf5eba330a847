//! Core types for the timeline service.
//!
//! - `Timeline`, `Event` and `EventType` entities and their request payloads
//! - `TimelineStore`: one JSON document per timeline on disk
//! - `TimelineService`: the operations, with event type integrity rules
//! - `ServerConfig`: configuration shared with the server binary

pub mod config;
pub mod error;
pub mod event;
pub mod event_time;
pub mod event_type;
pub mod service;
pub mod store;
pub mod timeline;

pub use config::ServerConfig;
pub use error::{EntityKind, TimelineError, TimelineResult};
pub use event::{Event, EventDraft};
pub use event_time::EventTime;
pub use event_type::{EventType, EventTypeDraft};
pub use service::TimelineService;
pub use store::TimelineStore;
pub use timeline::{ImportedEvent, Timeline, TimelineDraft, TimelineImport, TimelinePatch};
