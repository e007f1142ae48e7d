//! Route configuration.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        // Recycle bin
        .route("/api/admin/recycle-bin", get(handlers::list_deleted))
        .route("/api/admin/recycle-bin/restore", post(handlers::restore))
        .route(
            "/api/admin/recycle-bin/hard-delete",
            delete(handlers::hard_delete),
        )
        // Audit history
        .route("/api/admin/recycle-history", get(handlers::list_history))
        // Entities
        .route("/api/admin/entities/{type}", get(handlers::list_entities))
        .route(
            "/api/admin/entities/{type}/{id}",
            get(handlers::get_entity).delete(handlers::soft_delete_entity),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
