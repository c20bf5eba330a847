//! Timeline endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use timeline_core::{Timeline, TimelineDraft, TimelineImport, TimelinePatch};

use crate::routes::{Ack, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/timelines", get(list_timelines).post(create_timeline))
        .route("/api/timelines/import", post(import_timeline))
        .route(
            "/api/timelines/{id}",
            get(get_timeline).put(update_timeline).delete(delete_timeline),
        )
}

/// GET /api/timelines - List all timelines
async fn list_timelines(State(state): State<AppState>) -> Result<Json<Vec<Timeline>>, AppError> {
    Ok(Json(state.service.list_timelines()?))
}

/// POST /api/timelines - Create an empty timeline
async fn create_timeline(
    State(state): State<AppState>,
    Json(draft): Json<TimelineDraft>,
) -> Result<Json<Timeline>, AppError> {
    Ok(Json(state.service.create_timeline(draft)?))
}

/// POST /api/timelines/import - Create a timeline from an exported document
async fn import_timeline(
    State(state): State<AppState>,
    Json(import): Json<TimelineImport>,
) -> Result<Json<Timeline>, AppError> {
    Ok(Json(state.service.import_timeline(import)?))
}

/// GET /api/timelines/:id
async fn get_timeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Timeline>, AppError> {
    Ok(Json(state.service.get_timeline(&id)?))
}

/// PUT /api/timelines/:id - Update name and/or description
async fn update_timeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TimelinePatch>,
) -> Result<Json<Timeline>, AppError> {
    Ok(Json(state.service.update_timeline(&id, patch)?))
}

/// DELETE /api/timelines/:id
async fn delete_timeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    state.service.delete_timeline(&id)?;
    Ok(Ack::new("Timeline deleted successfully"))
}
