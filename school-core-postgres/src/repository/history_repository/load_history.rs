use async_trait::async_trait;
use school_core_api::{SortDirection, TypeSelector};
use school_core_db::models::HistoryRecordModel;
use school_core_db::repository::{HistoryFilter, LoadHistory, Page, PageRequest};
use sqlx::{Postgres, QueryBuilder};
use std::error::Error;

use super::repo_impl::{HistoryRepositoryImpl, HISTORY_COLUMNS};
use crate::utils::{contains_pattern, TryFromRow};

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &HistoryFilter) {
    qb.push(" WHERE TRUE");
    if let TypeSelector::Only(entity_type) = filter.types {
        qb.push(" AND entity_type = ").push_bind(entity_type);
    }
    if let Some(item_id) = filter.item_id {
        qb.push(" AND item_id = ").push_bind(item_id);
    }
    if let Some(action) = filter.action {
        qb.push(" AND action = ").push_bind(action);
    }
    if let Some(from) = filter.range.from {
        qb.push(r#" AND "timestamp" >= "#).push_bind(from);
    }
    if let Some(to) = filter.range.to {
        qb.push(r#" AND "timestamp" <= "#).push_bind(to);
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        qb.push(" AND (performed_by->>'name' ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR performed_by->>'email' ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}

impl HistoryRepositoryImpl {
    pub(super) async fn load_history_impl(
        repo: &HistoryRepositoryImpl,
        filter: &HistoryFilter,
        direction: SortDirection,
        page: PageRequest,
    ) -> Result<Page<HistoryRecordModel>, Box<dyn Error + Send + Sync>> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM recycle_history");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&repo.pool)
            .await?;

        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {HISTORY_COLUMNS} FROM recycle_history"));
        push_filter(&mut query, filter);
        query.push(match direction {
            SortDirection::Asc => r#" ORDER BY "timestamp" ASC, seq ASC"#,
            SortDirection::Desc => r#" ORDER BY "timestamp" DESC, seq DESC"#,
        });
        query
            .push(" LIMIT ")
            .push_bind(page.limit as i64)
            .push(" OFFSET ")
            .push_bind(page.offset as i64);

        let rows = query.build().fetch_all(&repo.pool).await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(HistoryRecordModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl LoadHistory for HistoryRepositoryImpl {
    async fn load_history(
        &self,
        filter: &HistoryFilter,
        direction: SortDirection,
        page: PageRequest,
    ) -> Result<Page<HistoryRecordModel>, Box<dyn Error + Send + Sync>> {
        Self::load_history_impl(self, filter, direction, page).await
    }
}
