//! Entity reads and single-item soft delete.
//!
//! Reads go through the active-only filter: a soft-deleted row answers `404`
//! here and is only reachable through the recycle bin or `includeDeleted`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use school_core_api::{ApiError, EntityDocument, EntityListQuery, EntityType, Paginated};
use uuid::Uuid;

use crate::auth::Actor;
use crate::error::HttpResult;
use crate::state::AppState;

fn parse_target(raw_type: &str, raw_id: &str) -> Result<(EntityType, Uuid), ApiError> {
    let entity_type: EntityType = raw_type.parse()?;
    let id = Uuid::parse_str(raw_id)
        .map_err(|_| ApiError::NotFound(format!("no {entity_type} with id {raw_id}")))?;
    Ok((entity_type, id))
}

/// GET /api/admin/entities/{type}
pub async fn list_entities(
    State(state): State<AppState>,
    Path(raw_type): Path<String>,
    query: Result<Query<EntityListQuery>, QueryRejection>,
) -> HttpResult<Json<Paginated<EntityDocument>>> {
    let Query(query) = query?;
    let entity_type: EntityType = raw_type.parse()?;
    Ok(Json(state.service.list_entities(entity_type, &query).await?))
}

/// GET /api/admin/entities/{type}/{id}
pub async fn get_entity(
    State(state): State<AppState>,
    Path((raw_type, raw_id)): Path<(String, String)>,
) -> HttpResult<Json<EntityDocument>> {
    let (entity_type, id) = parse_target(&raw_type, &raw_id)?;
    Ok(Json(state.service.get_entity(entity_type, id).await?))
}

/// DELETE /api/admin/entities/{type}/{id}
pub async fn soft_delete_entity(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path((raw_type, raw_id)): Path<(String, String)>,
) -> HttpResult<Json<EntityDocument>> {
    let (entity_type, id) = parse_target(&raw_type, &raw_id)?;
    Ok(Json(state.service.soft_delete(entity_type, id, &actor).await?))
}
