use async_trait::async_trait;
use school_core_db::models::HistoryRecordModel;
use school_core_db::repository::AppendHistory;
use sqlx::types::Json;
use std::error::Error;

use super::repo_impl::HistoryRepositoryImpl;

impl HistoryRepositoryImpl {
    pub(super) async fn append_history_impl(
        repo: &HistoryRepositoryImpl,
        record: HistoryRecordModel,
    ) -> Result<HistoryRecordModel, Box<dyn Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO recycle_history
                (id, item_id, entity_type, action, performed_by, "timestamp", snapshot, hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(record.item_id)
        .bind(record.entity_type)
        .bind(record.action)
        .bind(Json(&record.performed_by))
        .bind(record.timestamp)
        .bind(&record.snapshot)
        .bind(record.hash)
        .execute(&repo.pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl AppendHistory for HistoryRepositoryImpl {
    async fn append_history(
        &self,
        record: HistoryRecordModel,
    ) -> Result<HistoryRecordModel, Box<dyn Error + Send + Sync>> {
        Self::append_history_impl(self, record).await
    }
}
