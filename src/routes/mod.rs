pub mod images;
pub mod pitch;

use axum::Router;
use std::sync::Arc;

use crate::app::AppState;

/// Build all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(images::routes())
        .merge(pitch::routes())
        .with_state(state)
}
