use async_trait::async_trait;
use school_core_api::EntityType;
use school_core_db::models::DeletableModel;
use school_core_db::repository::{HardDelete, TransitionOutcome};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{EntityRepositoryImpl, RowState, ENTITY_COLUMNS};
use crate::utils::TryFromRow;

impl EntityRepositoryImpl {
    pub(super) async fn hard_delete_impl(
        repo: &EntityRepositoryImpl,
        entity_type: EntityType,
        id: Uuid,
    ) -> Result<TransitionOutcome, Box<dyn Error + Send + Sync>> {
        let query = format!(
            "DELETE FROM school_entity WHERE id = $1 AND entity_type = $2 AND is_deleted RETURNING {ENTITY_COLUMNS}"
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(entity_type)
            .fetch_optional(&repo.pool)
            .await?;

        if let Some(row) = row {
            return Ok(TransitionOutcome::Applied(DeletableModel::try_from_row(&row)?));
        }

        Ok(match repo.row_state(entity_type, id).await? {
            RowState::Active => TransitionOutcome::NotDeleted,
            RowState::Missing | RowState::Deleted => TransitionOutcome::NotFound,
        })
    }
}

#[async_trait]
impl HardDelete for EntityRepositoryImpl {
    async fn hard_delete(
        &self,
        entity_type: EntityType,
        id: Uuid,
    ) -> Result<TransitionOutcome, Box<dyn Error + Send + Sync>> {
        Self::hard_delete_impl(self, entity_type, id).await
    }
}
