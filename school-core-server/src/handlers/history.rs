use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use school_core_api::{HistoryItem, HistoryQuery, Paginated};

use crate::error::HttpResult;
use crate::state::AppState;

/// GET /api/admin/recycle-history
pub async fn list_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> HttpResult<Json<Paginated<HistoryItem>>> {
    let Query(query) = query?;
    Ok(Json(state.service.list_history(&query).await?))
}
