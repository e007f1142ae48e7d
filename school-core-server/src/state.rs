//! Application state.

use school_core_api::RecycleBinService;
use std::sync::Arc;

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn RecycleBinService>,
}

impl AppState {
    pub fn new(service: Arc<dyn RecycleBinService>) -> Self {
        Self { service }
    }
}
