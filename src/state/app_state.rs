use std::sync::Arc;

use crate::models::service_model::ServiceConfig;

/// Shared, read-only service state. Builds themselves hold no state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
