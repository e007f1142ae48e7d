use async_trait::async_trait;
use school_core_api::SortDirection;
use school_core_db::models::{search_fields, DeletableModel};
use school_core_db::repository::{Find, Page, PageRequest, RecordFilter, RecordOrder};
use sqlx::{Postgres, QueryBuilder};
use std::error::Error;

use super::repo_impl::{EntityRepositoryImpl, ENTITY_COLUMNS};
use crate::utils::{contains_pattern, TryFromRow};

/// Append the `WHERE` clause for `filter`. `is_deleted: None` adds no predicate.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &RecordFilter) {
    qb.push(" WHERE entity_type = ").push_bind(filter.entity_type);

    if let Some(ids) = &filter.ids {
        qb.push(" AND id = ANY(").push_bind(ids.clone()).push(")");
    }
    if let Some(is_deleted) = filter.is_deleted {
        qb.push(" AND is_deleted = ").push_bind(is_deleted);
    }
    if let Some(from) = filter.deleted_range.from {
        qb.push(" AND deleted_at >= ").push_bind(from);
    }
    if let Some(to) = filter.deleted_range.to {
        qb.push(" AND deleted_at <= ").push_bind(to);
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        qb.push(" AND (");
        for (i, field) in search_fields(filter.entity_type).iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push("data->>")
                .push_bind(*field)
                .push(" ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\'");
        }
        if !filter.search_linked_users.is_empty() {
            let user_ids: Vec<String> = filter
                .search_linked_users
                .iter()
                .map(|id| id.to_string())
                .collect();
            qb.push(" OR COALESCE(data->'userId'->>'_id', data->>'userId') = ANY(")
                .push_bind(user_ids)
                .push(")");
        }
        qb.push(")");
    }
}

fn order_clause(order: RecordOrder) -> &'static str {
    match order {
        RecordOrder::CreatedAt(SortDirection::Desc) => " ORDER BY created_at DESC, id DESC",
        RecordOrder::CreatedAt(SortDirection::Asc) => " ORDER BY created_at ASC, id ASC",
        RecordOrder::DeletedAt(SortDirection::Desc) => {
            " ORDER BY deleted_at DESC NULLS LAST, id DESC"
        }
        RecordOrder::DeletedAt(SortDirection::Asc) => " ORDER BY deleted_at ASC NULLS FIRST, id ASC",
    }
}

impl EntityRepositoryImpl {
    pub(super) async fn find_impl(
        repo: &EntityRepositoryImpl,
        filter: &RecordFilter,
        order: RecordOrder,
        page: PageRequest,
    ) -> Result<Page<DeletableModel>, Box<dyn Error + Send + Sync>> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM school_entity");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&repo.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {ENTITY_COLUMNS} FROM school_entity"));
        push_filter(&mut query, filter);
        query
            .push(order_clause(order))
            .push(" LIMIT ")
            .push_bind(page.limit as i64)
            .push(" OFFSET ")
            .push_bind(page.offset as i64);

        tracing::debug!(sql = query.sql(), "find");
        let rows = query.build().fetch_all(&repo.pool).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(DeletableModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl Find for EntityRepositoryImpl {
    async fn find(
        &self,
        filter: &RecordFilter,
        order: RecordOrder,
        page: PageRequest,
    ) -> Result<Page<DeletableModel>, Box<dyn Error + Send + Sync>> {
        Self::find_impl(self, filter, order, page).await
    }
}
