use std::sync::Arc;

use timeline_core::{TimelineService, TimelineStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TimelineService>,
}

impl AppState {
    pub fn new(store: TimelineStore) -> Self {
        AppState {
            service: Arc::new(TimelineService::new(store)),
        }
    }
}
