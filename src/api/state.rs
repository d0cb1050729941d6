use std::sync::Arc;

use crate::services::Recommender;

/// Shared application state
///
/// Everything behind it is read-only after startup, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}
