//! Event type endpoints, scoped to a timeline

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{post, put},
};

use timeline_core::{EventType, EventTypeDraft};

use crate::routes::{Ack, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/timelines/{id}/event-types", post(create_event_type))
        .route(
            "/api/timelines/{id}/event-types/{name}",
            put(update_event_type).delete(delete_event_type),
        )
}

/// POST /api/timelines/:id/event-types
async fn create_event_type(
    State(state): State<AppState>,
    Path(timeline_id): Path<String>,
    Json(draft): Json<EventTypeDraft>,
) -> Result<Json<EventType>, AppError> {
    Ok(Json(state.service.create_event_type(&timeline_id, draft)?))
}

/// PUT /api/timelines/:id/event-types/:name - Rename and/or recolor
async fn update_event_type(
    State(state): State<AppState>,
    Path((timeline_id, name)): Path<(String, String)>,
    Json(draft): Json<EventTypeDraft>,
) -> Result<Json<EventType>, AppError> {
    Ok(Json(
        state.service.update_event_type(&timeline_id, &name, draft)?,
    ))
}

/// DELETE /api/timelines/:id/event-types/:name - Only allowed when unused
async fn delete_event_type(
    State(state): State<AppState>,
    Path((timeline_id, name)): Path<(String, String)>,
) -> Result<Json<Ack>, AppError> {
    state.service.delete_event_type(&timeline_id, &name)?;
    Ok(Ack::new("Event type deleted successfully"))
}
