//! Event endpoints, scoped to a timeline

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{post, put},
};

use timeline_core::{Event, EventDraft};

use crate::routes::{Ack, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/timelines/{id}/events", post(create_event))
        .route(
            "/api/timelines/{id}/events/{event_id}",
            put(update_event).delete(delete_event),
        )
}

/// POST /api/timelines/:id/events - Append an event
async fn create_event(
    State(state): State<AppState>,
    Path(timeline_id): Path<String>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.service.create_event(&timeline_id, draft)?))
}

/// PUT /api/timelines/:id/events/:event_id - Replace an event's fields
async fn update_event(
    State(state): State<AppState>,
    Path((timeline_id, event_id)): Path<(String, String)>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.service.update_event(&timeline_id, &event_id, draft)?))
}

/// DELETE /api/timelines/:id/events/:event_id
async fn delete_event(
    State(state): State<AppState>,
    Path((timeline_id, event_id)): Path<(String, String)>,
) -> Result<Json<Ack>, AppError> {
    state.service.delete_event(&timeline_id, &event_id)?;
    Ok(Ack::new("Event deleted successfully"))
}
