use std::sync::Arc;

use crate::config::Settings;
use crate::generation::TextGenerator;
use crate::storage::Storage;

/// Shared application state passed to all route handlers.
pub struct AppState {
    pub settings: Settings,
    pub storage: Arc<dyn Storage>,
    /// Absent when no generation API key is configured; the pitch routes
    /// answer 404 in that case.
    pub generator: Option<Arc<dyn TextGenerator>>,
}
