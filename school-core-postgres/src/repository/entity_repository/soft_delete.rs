use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_core_api::{ActorRef, EntityType};
use school_core_db::models::DeletableModel;
use school_core_db::repository::SoftDelete;
use sqlx::types::Json;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::EntityRepositoryImpl;
use crate::utils::TryFromRow;

impl EntityRepositoryImpl {
    pub(super) async fn soft_delete_impl(
        repo: &EntityRepositoryImpl,
        entity_type: EntityType,
        id: Uuid,
        actor: &ActorRef,
        at: DateTime<Utc>,
    ) -> Result<Option<DeletableModel>, Box<dyn Error + Send + Sync>> {
        // One statement: lock the active row, flag it, hand back its prior state.
        let row = sqlx::query(
            r#"
            WITH old AS (
                SELECT * FROM school_entity
                WHERE id = $1 AND entity_type = $2 AND NOT is_deleted
                FOR UPDATE
            )
            UPDATE school_entity e
            SET is_deleted = TRUE, deleted_at = $3, deleted_by = $4
            FROM old
            WHERE e.id = old.id
            RETURNING old.*
            "#,
        )
        .bind(id)
        .bind(entity_type)
        .bind(at)
        .bind(Json(actor))
        .fetch_optional(&repo.pool)
        .await?;

        row.as_ref().map(DeletableModel::try_from_row).transpose()
    }
}

#[async_trait]
impl SoftDelete for EntityRepositoryImpl {
    async fn soft_delete(
        &self,
        entity_type: EntityType,
        id: Uuid,
        actor: &ActorRef,
        at: DateTime<Utc>,
    ) -> Result<Option<DeletableModel>, Box<dyn Error + Send + Sync>> {
        Self::soft_delete_impl(self, entity_type, id, actor, at).await
    }
}
