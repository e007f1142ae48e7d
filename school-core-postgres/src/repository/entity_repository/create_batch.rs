use async_trait::async_trait;
use school_core_db::models::DeletableModel;
use school_core_db::repository::CreateBatch;
use sqlx::types::Json;
use std::error::Error;

use super::repo_impl::EntityRepositoryImpl;
use crate::utils::is_unique_violation;

impl EntityRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &EntityRepositoryImpl,
        items: Vec<DeletableModel>,
    ) -> Result<Vec<DeletableModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(items);
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            let result = sqlx::query(
                r#"
                INSERT INTO school_entity
                    (id, entity_type, data, natural_key, is_deleted, deleted_at, deleted_by, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id)
            .bind(item.entity_type)
            .bind(&item.data)
            .bind(item.natural_key.as_deref())
            .bind(item.is_deleted)
            .bind(item.deleted_at)
            .bind(item.deleted_by.as_ref().map(Json))
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await;

            if let Err(e) = result {
                if is_unique_violation(&e) {
                    return Err(format!(
                        "an active {} already holds natural key '{}'",
                        item.entity_type,
                        item.natural_key.as_deref().unwrap_or_default()
                    )
                    .into());
                }
                return Err(e.into());
            }
        }
        tx.commit().await?;

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<DeletableModel> for EntityRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<DeletableModel>,
    ) -> Result<Vec<DeletableModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
