//! Recycle-bin endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use school_core_api::{
    BatchRequest, HardDeleteResponse, Paginated, RecycleBinItem, RecycleBinQuery, RestoreResponse,
};

use crate::auth::Actor;
use crate::error::HttpResult;
use crate::state::AppState;

/// GET /api/admin/recycle-bin
pub async fn list_deleted(
    State(state): State<AppState>,
    query: Result<Query<RecycleBinQuery>, QueryRejection>,
) -> HttpResult<Json<Paginated<RecycleBinItem>>> {
    let Query(query) = query?;
    let page = state.service.list_deleted(&query).await?;
    Ok(Json(page))
}

/// POST /api/admin/recycle-bin/restore
///
/// Per-id failures are part of a `200` response; only a malformed request
/// fails as a whole.
pub async fn restore(
    State(state): State<AppState>,
    Actor(actor): Actor,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> HttpResult<Json<RestoreResponse>> {
    let Json(request) = body?;
    let outcome = state.service.restore(&request, &actor).await?;
    Ok(Json(outcome.into_restore_response()))
}

/// DELETE /api/admin/recycle-bin/hard-delete
pub async fn hard_delete(
    State(state): State<AppState>,
    Actor(actor): Actor,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> HttpResult<Json<HardDeleteResponse>> {
    let Json(request) = body?;
    let outcome = state.service.hard_delete(&request, &actor).await?;
    Ok(Json(outcome.into_hard_delete_response()))
}
